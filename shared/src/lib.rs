//! Shared types for the process monitoring platform
//!
//! Domain models, registry snapshot types and sync result DTOs used by
//! the monitor engine and by calling code (API layer, background jobs).

pub mod models;
pub mod registry;
pub mod sync;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Model re-exports (for convenient access)
pub use models::{Actuation, ActuationKey, MonitoredProcess, NewMonitor, ProcessStatus};
pub use registry::{ProcessSnapshot, SnapshotActuation};
pub use sync::{BatchSyncResult, SyncAttemptResult, SyncFailure, SyncFailureKind, SyncTrigger};
