//! Database implementations

pub mod fulfillment_repository;
pub mod helpers;
pub mod manager;
pub mod proposal_repository;
pub mod recipient_directory;
pub mod settings_repository;

pub use fulfillment_repository::*;
pub use manager::*;
pub use proposal_repository::*;
pub use recipient_directory::*;
pub use settings_repository::*;
