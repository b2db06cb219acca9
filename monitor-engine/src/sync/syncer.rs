//! ProcessSyncer — one case, one unit of work
//!
//! Fetches the registry snapshot for a case, reconciles it against the
//! stored actuation set, persists what is new and refreshes the case's
//! denormalized summary. Succeeds or fails independently; failures are
//! folded into the returned result and never raised past the caller.

use std::sync::Arc;

use chrono::Utc;
use shared::models::{Actuation, MonitoredProcess};
use shared::registry::ProcessSnapshot;
use shared::sync::{SyncAttemptResult, SyncFailureKind};
use uuid::Uuid;

use super::reconciler::reconcile;
use crate::registry::RegistryClient;
use crate::store::{MonitoringStore, StoreError, SyncSummary};

/// Whether persisted actuations enter the notification path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Regular sync: inserted rows are flagged `is_new` for the
    /// downstream notification consumer
    Notify,
    /// Initial seeding after registration: history is stored silently
    Seed,
}

pub struct ProcessSyncer {
    registry: Arc<dyn RegistryClient>,
    store: Arc<dyn MonitoringStore>,
}

impl ProcessSyncer {
    pub fn new(registry: Arc<dyn RegistryClient>, store: Arc<dyn MonitoringStore>) -> Self {
        Self { registry, store }
    }

    /// Sync one case. Every invocation resolves to exactly one terminal
    /// outcome; the store is never touched after a fetch failure.
    pub async fn sync_one(&self, process: &MonitoredProcess, mode: SyncMode) -> SyncAttemptResult {
        let snapshot = match self.registry.fetch_by_docket(&process.docket).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(docket = %process.docket, error = %e, "Registry fetch failed");
                return SyncAttemptResult::failed(
                    process.id,
                    &process.docket,
                    SyncFailureKind::Fetch,
                    e.to_string(),
                );
            }
        };

        // Docket unknown to the provider today: valid terminal state
        if snapshot.is_empty() {
            tracing::debug!(docket = %process.docket, "Docket unknown to registry");
            return SyncAttemptResult::succeeded(process.id, &process.docket, 0);
        }

        match self.apply(process, &snapshot, mode).await {
            Ok(inserted) => {
                if inserted > 0 {
                    tracing::info!(
                        docket = %process.docket,
                        new_actuations = inserted,
                        "Sync persisted new actuations"
                    );
                }
                SyncAttemptResult::succeeded(process.id, &process.docket, inserted)
            }
            Err(e) => {
                tracing::error!(docket = %process.docket, error = %e, "Sync persistence failed");
                SyncAttemptResult::failed(
                    process.id,
                    &process.docket,
                    SyncFailureKind::Store,
                    e.to_string(),
                )
            }
        }
    }

    async fn apply(
        &self,
        process: &MonitoredProcess,
        snapshot: &ProcessSnapshot,
        mode: SyncMode,
    ) -> Result<u32, StoreError> {
        let existing = self.store.actuation_keys(process.id).await?;
        let fresh = reconcile(&existing, &snapshot.actuations);

        if fresh.is_empty() {
            // Nothing new; at most fill a forum we did not know yet
            if let Some(forum) = &snapshot.forum {
                self.store.set_forum_if_absent(process.id, forum).await?;
            }
            return Ok(0);
        }

        let is_new = mode == SyncMode::Notify;
        let now = Utc::now();
        let rows: Vec<Actuation> = fresh
            .iter()
            .map(|a| Actuation {
                id: Uuid::new_v4(),
                process_id: process.id,
                date: a.date,
                kind: a.kind.clone(),
                annotation: a.annotation.clone(),
                start_date: a.start_date,
                end_date: a.end_date,
                is_new,
                created_at: now,
            })
            .collect();

        let inserted = self.store.insert_actuations(process.id, rows).await?;

        let most_recent = snapshot.most_recent();
        let summary = SyncSummary {
            // None leaves a previously known forum untouched
            forum: snapshot.forum.clone(),
            last_actuation_date: most_recent.map(|a| a.date).or(snapshot.most_recent_date),
            last_actuation_desc: most_recent.map(|a| a.description().to_string()),
        };
        self.store.update_sync_summary(process.id, summary).await?;

        Ok(inserted)
    }
}
