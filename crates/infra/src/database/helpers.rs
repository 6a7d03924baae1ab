//! Shared row-mapping and error-mapping helpers for the SQLite repositories.

use std::str::FromStr;

use atelier_domain::AtelierError;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use tokio::task;

use crate::errors::InfraError;

/// Parse a TEXT status column into its domain enum, surfacing bad data as a
/// column conversion failure.
pub(crate) fn parse_enum<T>(value: String, column_index: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(|err: String| {
        rusqlite::Error::FromSqlConversionFailure(column_index, Type::Text, err.into())
    })
}

/// Convert a unix-seconds column into a `DateTime<Utc>`.
pub(crate) fn datetime_from(secs: i64, column_index: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            column_index,
            Type::Integer,
            format!("timestamp out of range: {secs}").into(),
        )
    })
}

/// Convert an optional unix-seconds column.
pub(crate) fn opt_datetime_from(
    secs: Option<i64>,
    column_index: usize,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    secs.map(|value| datetime_from(value, column_index)).transpose()
}

/// Unix-seconds representation for binding an optional timestamp.
pub(crate) fn opt_ts(value: Option<DateTime<Utc>>) -> Option<i64> {
    value.map(|dt| dt.timestamp())
}

pub(crate) fn map_sql_error(err: rusqlite::Error) -> AtelierError {
    AtelierError::from(InfraError::from(err))
}

pub(crate) fn map_join_error(err: task::JoinError) -> AtelierError {
    if err.is_cancelled() {
        AtelierError::Internal("blocking database task cancelled".into())
    } else {
        AtelierError::Internal(format!("blocking database task failed: {err}"))
    }
}
