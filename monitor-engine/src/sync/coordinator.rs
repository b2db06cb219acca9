//! BatchSyncCoordinator — paced batch over one owner's cases
//!
//! Sequential by design: the registry is a scarce, rate-limited resource,
//! so cases are synced one at a time with an enforced delay between them.
//! Parallelizing would defeat the rate-limit budget.

use std::time::Duration;

use shared::models::MonitoredProcess;
use shared::sync::{BatchSyncResult, SyncAttemptResult};
use tokio_util::sync::CancellationToken;

use super::syncer::{ProcessSyncer, SyncMode};

pub struct BatchSyncCoordinator {
    syncer: ProcessSyncer,
    delay: Duration,
    cancel: CancellationToken,
}

impl BatchSyncCoordinator {
    pub fn new(syncer: ProcessSyncer, delay: Duration) -> Self {
        Self {
            syncer,
            delay,
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a caller-held token; cancellation is honored between cases,
    /// never mid-case
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Sync every case in list order. One case's failure is recorded and
    /// iteration continues; the batch never aborts early on errors.
    pub async fn sync_all(&self, processes: &[MonitoredProcess]) -> BatchSyncResult {
        let mut attempts: Vec<SyncAttemptResult> = Vec::with_capacity(processes.len());
        let mut cancelled = self.cancel.is_cancelled();

        for (i, process) in processes.iter().enumerate() {
            if cancelled {
                break;
            }

            // Inter-case pacing; a cancellation during the wait stops the
            // batch before the next case starts
            if i > 0 {
                tokio::select! {
                    _ = tokio::time::sleep(self.delay) => {}
                    _ = self.cancel.cancelled() => {
                        cancelled = true;
                        break;
                    }
                }
            }

            attempts.push(self.syncer.sync_one(process, SyncMode::Notify).await);
        }

        if cancelled {
            tracing::info!(
                attempted = attempts.len(),
                total = processes.len(),
                "Batch sync cancelled"
            );
        }

        BatchSyncResult::from_attempts(attempts, cancelled)
    }

    /// Single-case convenience path; no pacing needed
    pub async fn sync_one(&self, process: &MonitoredProcess) -> SyncAttemptResult {
        self.syncer.sync_one(process, SyncMode::Notify).await
    }
}
