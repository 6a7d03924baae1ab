//! # Atelier Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Database implementations (SQLite via rusqlite/r2d2)
//! - The transactional fulfillment and proposal repositories
//! - The notification outbox
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `atelier-core`
//! - Depends on `atelier-domain` and `atelier-core`
//! - Contains all "impure" code (I/O, SQL)

pub mod config;
pub mod database;
pub mod errors;
pub mod notifications;

// Re-export commonly used items
pub use database::*;
pub use notifications::*;
