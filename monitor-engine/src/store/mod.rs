//! Monitoring store boundary
//!
//! The durable store is an external collaborator; this trait is the
//! contract the engine writes against. Each case's writes touch only that
//! case's rows: isolation comes from partitioning by process id, not
//! from locking.

pub mod memory;

pub use memory::MemoryStore;

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{Actuation, ActuationKey, LawyerId, MonitoredProcess, ProcessId};
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Row not found: {0}")]
    Missing(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Denormalized per-case summary written after a successful sync.
///
/// `forum: None` leaves the stored forum untouched; a transient provider
/// gap must never erase a previously known forum.
#[derive(Debug, Clone)]
pub struct SyncSummary {
    pub forum: Option<String>,
    pub last_actuation_date: Option<NaiveDate>,
    pub last_actuation_desc: Option<String>,
}

/// Durable persistence contract for monitored processes and actuations
#[async_trait]
pub trait MonitoringStore: Send + Sync {
    async fn insert_process(&self, process: MonitoredProcess) -> StoreResult<MonitoredProcess>;

    async fn process_by_id(&self, id: ProcessId) -> StoreResult<Option<MonitoredProcess>>;

    async fn process_by_docket(
        &self,
        owner: LawyerId,
        docket: &str,
    ) -> StoreResult<Option<MonitoredProcess>>;

    /// All of the owner's processes with status active and notifications
    /// enabled, in registration order
    async fn active_monitored(&self, owner: LawyerId) -> StoreResult<Vec<MonitoredProcess>>;

    /// Hard delete; cascades the process's actuations. Returns whether a
    /// row was actually removed.
    async fn delete_process(&self, id: ProcessId) -> StoreResult<bool>;

    /// Dedup-key set of the process's stored actuations
    async fn actuation_keys(&self, id: ProcessId) -> StoreResult<HashSet<ActuationKey>>;

    /// Insert actuation rows, skipping any whose key is already present
    /// (concurrent syncs of the same case may race; the key check makes
    /// the insert idempotent). Returns the number actually inserted.
    async fn insert_actuations(&self, id: ProcessId, rows: Vec<Actuation>) -> StoreResult<u32>;

    async fn actuations(&self, id: ProcessId) -> StoreResult<Vec<Actuation>>;

    /// Apply the post-sync denormalized summary and bump `updated_at`
    async fn update_sync_summary(&self, id: ProcessId, summary: SyncSummary) -> StoreResult<()>;

    /// Fill the forum only when the stored value is currently null
    async fn set_forum_if_absent(&self, id: ProcessId, forum: &str) -> StoreResult<()>;
}
