//! Incremental synchronization core
//!
//! `reconciler` isolates genuinely new actuations, `ProcessSyncer` runs
//! one case as an independent unit of work, `BatchSyncCoordinator` paces
//! a whole batch against the rate-limited registry.

pub mod coordinator;
pub mod reconciler;
pub mod syncer;

pub use coordinator::BatchSyncCoordinator;
pub use reconciler::reconcile;
pub use syncer::{ProcessSyncer, SyncMode};
