//! Conversions from external infrastructure errors into domain errors.

use atelier_domain::AtelierError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AtelierError);

impl From<InfraError> for AtelierError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AtelierError> for InfraError {
    fn from(value: AtelierError) -> Self {
        InfraError(value)
    }
}

impl From<SqlError> for InfraError {
    fn from(err: SqlError) -> Self {
        use rusqlite::ffi::ErrorCode;

        let mapped = match &err {
            SqlError::SqliteFailure(failure, maybe_message) => {
                let message = maybe_message.clone().unwrap_or_default();
                match (failure.code, failure.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        AtelierError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        AtelierError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => AtelierError::Database(format!(
                        "unique constraint violation: {message}"
                    )),
                    (ErrorCode::ConstraintViolation, 787) => AtelierError::Database(format!(
                        "foreign key constraint violation: {message}"
                    )),
                    (ErrorCode::ConstraintViolation, _) => {
                        AtelierError::Database(format!("constraint violation: {message}"))
                    }
                    _ => AtelierError::Database(err.to_string()),
                }
            }
            SqlError::QueryReturnedNoRows => {
                AtelierError::Database("query returned no rows".into())
            }
            _ => AtelierError::Database(err.to_string()),
        };

        InfraError(mapped)
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        InfraError(AtelierError::Database(format!("connection pool error: {err}")))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(err: serde_json::Error) -> Self {
        InfraError(AtelierError::Database(format!("payload serialization failed: {err}")))
    }
}
