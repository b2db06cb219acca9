//! In-memory MonitoringStore
//!
//! DashMap-backed reference implementation. Used by the integration tests
//! and by embedders that want the engine without a durable backend.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use shared::models::{Actuation, ActuationKey, LawyerId, MonitoredProcess, ProcessId};

use super::{MonitoringStore, StoreError, StoreResult, SyncSummary};

struct StoredProcess {
    seq: u64,
    process: MonitoredProcess,
}

/// DashMap-backed store; per-process entry locking keeps same-case
/// operations serialized without any global lock
#[derive(Default)]
pub struct MemoryStore {
    processes: DashMap<ProcessId, StoredProcess>,
    actuations: DashMap<ProcessId, Vec<Actuation>>,
    insert_seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MonitoringStore for MemoryStore {
    async fn insert_process(&self, process: MonitoredProcess) -> StoreResult<MonitoredProcess> {
        let duplicate = self.processes.iter().any(|entry| {
            entry.process.owner_id == process.owner_id && entry.process.docket == process.docket
        });
        if duplicate {
            return Err(StoreError::Constraint(format!(
                "docket {} already registered for owner",
                process.docket
            )));
        }

        let seq = self.insert_seq.fetch_add(1, Ordering::SeqCst);
        self.processes.insert(
            process.id,
            StoredProcess {
                seq,
                process: process.clone(),
            },
        );
        Ok(process)
    }

    async fn process_by_id(&self, id: ProcessId) -> StoreResult<Option<MonitoredProcess>> {
        Ok(self.processes.get(&id).map(|entry| entry.process.clone()))
    }

    async fn process_by_docket(
        &self,
        owner: LawyerId,
        docket: &str,
    ) -> StoreResult<Option<MonitoredProcess>> {
        Ok(self
            .processes
            .iter()
            .find(|entry| entry.process.owner_id == owner && entry.process.docket == docket)
            .map(|entry| entry.process.clone()))
    }

    async fn active_monitored(&self, owner: LawyerId) -> StoreResult<Vec<MonitoredProcess>> {
        let mut rows: Vec<(u64, MonitoredProcess)> = self
            .processes
            .iter()
            .filter(|entry| entry.process.owner_id == owner && entry.process.is_syncable())
            .map(|entry| (entry.seq, entry.process.clone()))
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        Ok(rows.into_iter().map(|(_, process)| process).collect())
    }

    async fn delete_process(&self, id: ProcessId) -> StoreResult<bool> {
        let removed = self.processes.remove(&id).is_some();
        self.actuations.remove(&id);
        Ok(removed)
    }

    async fn actuation_keys(&self, id: ProcessId) -> StoreResult<HashSet<ActuationKey>> {
        Ok(self
            .actuations
            .get(&id)
            .map(|rows| rows.iter().map(Actuation::key).collect())
            .unwrap_or_default())
    }

    async fn insert_actuations(&self, id: ProcessId, rows: Vec<Actuation>) -> StoreResult<u32> {
        if !self.processes.contains_key(&id) {
            return Err(StoreError::Missing(format!("process {id}")));
        }

        // Entry guard serializes concurrent inserts for the same case
        let mut stored = self.actuations.entry(id).or_default();
        let existing: HashSet<ActuationKey> = stored.iter().map(Actuation::key).collect();

        let mut inserted = 0;
        for row in rows {
            if existing.contains(&row.key()) {
                continue;
            }
            stored.push(row);
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn actuations(&self, id: ProcessId) -> StoreResult<Vec<Actuation>> {
        Ok(self
            .actuations
            .get(&id)
            .map(|rows| rows.value().clone())
            .unwrap_or_default())
    }

    async fn update_sync_summary(&self, id: ProcessId, summary: SyncSummary) -> StoreResult<()> {
        let mut entry = self
            .processes
            .get_mut(&id)
            .ok_or_else(|| StoreError::Missing(format!("process {id}")))?;

        let process = &mut entry.process;
        if let Some(forum) = summary.forum {
            process.forum = Some(forum);
        }
        process.last_actuation_date = summary.last_actuation_date;
        process.last_actuation_desc = summary.last_actuation_desc;
        process.updated_at = Utc::now();
        Ok(())
    }

    async fn set_forum_if_absent(&self, id: ProcessId, forum: &str) -> StoreResult<()> {
        let mut entry = self
            .processes
            .get_mut(&id)
            .ok_or_else(|| StoreError::Missing(format!("process {id}")))?;

        if entry.process.forum.is_none() {
            entry.process.forum = Some(forum.to_string());
            entry.process.updated_at = Utc::now();
        }
        Ok(())
    }
}
