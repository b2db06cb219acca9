//! Data models
//!
//! Shared between the monitor engine and calling code (API layer, jobs).
//! All IDs are `uuid::Uuid`; actuation dates are calendar dates
//! (`chrono::NaiveDate`) as reported by the judicial registry.

pub mod actuation;
pub mod process;

// Re-exports
pub use actuation::*;
pub use process::*;
