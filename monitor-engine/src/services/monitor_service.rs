//! MonitorService — public entry points of the monitoring engine
//!
//! Owns the collaborators (registry, store, metering) and enforces the
//! pre-flight rules: request validation, ownership checks and credit
//! authorization before any registry work.

use std::sync::Arc;

use shared::models::{LawyerId, MonitoredProcess, NewMonitor, ProcessId};
use shared::registry::ProcessSnapshot;
use shared::sync::{BatchSyncResult, SyncAttemptResult, SyncTrigger};
use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::common::error::{MonitorError, MonitorResult};
use crate::config::EngineConfig;
use crate::metering::MeteringGateway;
use crate::registry::RegistryClient;
use crate::store::MonitoringStore;
use crate::sync::{BatchSyncCoordinator, ProcessSyncer, SyncMode};

pub struct MonitorService {
    registry: Arc<dyn RegistryClient>,
    store: Arc<dyn MonitoringStore>,
    metering: Arc<dyn MeteringGateway>,
    config: EngineConfig,
}

impl MonitorService {
    pub fn new(
        registry: Arc<dyn RegistryClient>,
        store: Arc<dyn MonitoringStore>,
        metering: Arc<dyn MeteringGateway>,
        config: EngineConfig,
    ) -> Self {
        Self {
            registry,
            store,
            metering,
            config,
        }
    }

    fn syncer(&self) -> ProcessSyncer {
        ProcessSyncer::new(self.registry.clone(), self.store.clone())
    }

    /// Read-only preview of a docket, used before deciding to monitor it.
    /// Performs no persistence and consumes no monitored-case quota.
    pub async fn lookup(&self, docket: &str) -> MonitorResult<ProcessSnapshot> {
        Ok(self.registry.fetch_by_docket(docket).await?)
    }

    /// Register a docket for monitoring; seeds its actuation history
    /// without flagging the seeded rows for notification
    pub async fn add_monitor(
        &self,
        owner: LawyerId,
        request: NewMonitor,
    ) -> MonitorResult<MonitoredProcess> {
        request
            .validate()
            .map_err(|e| MonitorError::Validation(e.to_string()))?;

        if self
            .store
            .process_by_docket(owner, &request.docket)
            .await?
            .is_some()
        {
            return Err(MonitorError::Duplicate(request.docket.clone()));
        }

        let process = self
            .store
            .insert_process(MonitoredProcess::from_request(owner, &request))
            .await?;
        tracing::info!(owner = %owner, docket = %process.docket, "Monitor registered");

        if request.seed_on_create {
            let attempt = self.syncer().sync_one(&process, SyncMode::Seed).await;
            match &attempt.failure {
                // Registration stands even if seeding fails; the next
                // sync fills the history
                Some(failure) => tracing::warn!(
                    docket = %process.docket,
                    error = %failure.message,
                    "Initial seed failed, monitor starts empty"
                ),
                None => tracing::debug!(
                    docket = %process.docket,
                    seeded = attempt.new_actuations,
                    "Initial seed complete"
                ),
            }

            // Pick up the forum/summary fields the seed may have written
            if let Some(refreshed) = self.store.process_by_id(process.id).await? {
                return Ok(refreshed);
            }
        }

        Ok(process)
    }

    /// Stop monitoring: hard delete, cascading the case's actuations
    pub async fn remove_monitor(&self, process_id: ProcessId, owner: LawyerId) -> MonitorResult<()> {
        let process = self.owned_process(process_id, owner).await?;
        self.store.delete_process(process.id).await?;
        tracing::info!(owner = %owner, docket = %process.docket, "Monitor removed");
        Ok(())
    }

    /// Sync one case by internal id
    pub async fn sync_process(
        &self,
        process_id: ProcessId,
        owner: LawyerId,
    ) -> MonitorResult<SyncAttemptResult> {
        let process = self.owned_process(process_id, owner).await?;

        self.metering.authorize(owner, 1).await?;
        let coordinator =
            BatchSyncCoordinator::new(self.syncer(), self.config.pacing(SyncTrigger::Manual));
        let attempt = coordinator.sync_one(&process).await;
        self.metering.report(owner, 1).await;

        Ok(attempt)
    }

    /// Sync every active, notification-enabled case owned by the lawyer
    pub async fn sync_all(
        &self,
        owner: LawyerId,
        trigger: SyncTrigger,
    ) -> MonitorResult<BatchSyncResult> {
        self.sync_all_with(owner, trigger, CancellationToken::new())
            .await
    }

    /// `sync_all` with a caller-held cancellation token; cancellation is
    /// honored between cases and yields a partial result
    pub async fn sync_all_with(
        &self,
        owner: LawyerId,
        trigger: SyncTrigger,
        cancel: CancellationToken,
    ) -> MonitorResult<BatchSyncResult> {
        let processes = self.store.active_monitored(owner).await?;
        if processes.is_empty() {
            return Ok(BatchSyncResult::from_attempts(Vec::new(), false));
        }

        self.metering
            .authorize(owner, processes.len() as u32)
            .await?;

        let coordinator = BatchSyncCoordinator::new(self.syncer(), self.config.pacing(trigger))
            .with_cancellation(cancel);
        let result = coordinator.sync_all(&processes).await;

        self.metering.report(owner, result.attempted()).await;
        tracing::info!(
            owner = %owner,
            cases = result.attempted(),
            new_actuations = result.total_new_actuations,
            cancelled = result.cancelled,
            "Batch sync complete"
        );

        Ok(result)
    }

    async fn owned_process(
        &self,
        process_id: ProcessId,
        owner: LawyerId,
    ) -> MonitorResult<MonitoredProcess> {
        let process = self
            .store
            .process_by_id(process_id)
            .await?
            .ok_or_else(|| MonitorError::NotFound(process_id.to_string()))?;

        if process.owner_id != owner {
            return Err(MonitorError::Ownership(process_id.to_string()));
        }
        Ok(process)
    }
}
