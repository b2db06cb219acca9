//! Shared helpers for the integration tests: a scripted registry, a
//! fault-injecting store wrapper and a counting metering gateway.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use uuid::Uuid;

use monitor_engine::metering::{MeteringError, MeteringGateway};
use monitor_engine::registry::{FetchResult, RegistryClient};
use monitor_engine::store::{MemoryStore, MonitoringStore, StoreError, StoreResult, SyncSummary};
use monitor_engine::{EngineConfig, MonitorService};
use shared::models::{Actuation, ActuationKey, LawyerId, MonitoredProcess, ProcessId};
use shared::registry::{ProcessSnapshot, SnapshotActuation};

pub const DOCKET: &str = "11001-31-03-003-2020-00123-00";

#[derive(Default)]
struct Script {
    queue: VecDeque<FetchResult<ProcessSnapshot>>,
    last: Option<FetchResult<ProcessSnapshot>>,
}

/// Registry stub: per-docket scripted responses, consumed in order; once
/// the queue is drained the last response keeps repeating, and unscripted
/// dockets are unknown to the provider
#[derive(Default)]
pub struct ScriptedRegistry {
    scripts: Mutex<HashMap<String, Script>>,
    calls: AtomicU32,
}

impl ScriptedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, docket: &str, response: FetchResult<ProcessSnapshot>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(docket.to_string())
            .or_default()
            .queue
            .push_back(response);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_response(&self, docket: &str) -> FetchResult<ProcessSnapshot> {
        let mut scripts = self.scripts.lock().unwrap();
        let Some(script) = scripts.get_mut(docket) else {
            return Ok(ProcessSnapshot::empty());
        };
        match script.queue.pop_front() {
            Some(response) => {
                script.last = Some(response.clone());
                response
            }
            None => script
                .last
                .clone()
                .unwrap_or_else(|| Ok(ProcessSnapshot::empty())),
        }
    }
}

#[async_trait]
impl RegistryClient for ScriptedRegistry {
    async fn fetch_by_docket(&self, docket: &str) -> FetchResult<ProcessSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.next_response(docket)
    }
}

/// Store wrapper that fails actuation inserts for chosen processes
pub struct FlakyStore {
    inner: MemoryStore,
    fail_inserts_for: Mutex<HashSet<ProcessId>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_inserts_for: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_inserts_for(&self, id: ProcessId) {
        self.fail_inserts_for.lock().unwrap().insert(id);
    }
}

#[async_trait]
impl MonitoringStore for FlakyStore {
    async fn insert_process(&self, process: MonitoredProcess) -> StoreResult<MonitoredProcess> {
        self.inner.insert_process(process).await
    }

    async fn process_by_id(&self, id: ProcessId) -> StoreResult<Option<MonitoredProcess>> {
        self.inner.process_by_id(id).await
    }

    async fn process_by_docket(
        &self,
        owner: LawyerId,
        docket: &str,
    ) -> StoreResult<Option<MonitoredProcess>> {
        self.inner.process_by_docket(owner, docket).await
    }

    async fn active_monitored(&self, owner: LawyerId) -> StoreResult<Vec<MonitoredProcess>> {
        self.inner.active_monitored(owner).await
    }

    async fn delete_process(&self, id: ProcessId) -> StoreResult<bool> {
        self.inner.delete_process(id).await
    }

    async fn actuation_keys(&self, id: ProcessId) -> StoreResult<HashSet<ActuationKey>> {
        self.inner.actuation_keys(id).await
    }

    async fn insert_actuations(&self, id: ProcessId, rows: Vec<Actuation>) -> StoreResult<u32> {
        if self.fail_inserts_for.lock().unwrap().contains(&id) {
            return Err(StoreError::Unavailable("injected write failure".to_string()));
        }
        self.inner.insert_actuations(id, rows).await
    }

    async fn actuations(&self, id: ProcessId) -> StoreResult<Vec<Actuation>> {
        self.inner.actuations(id).await
    }

    async fn update_sync_summary(&self, id: ProcessId, summary: SyncSummary) -> StoreResult<()> {
        self.inner.update_sync_summary(id, summary).await
    }

    async fn set_forum_if_absent(&self, id: ProcessId, forum: &str) -> StoreResult<()> {
        self.inner.set_forum_if_absent(id, forum).await
    }
}

/// Metering stub recording every authorize/report call
#[derive(Default)]
pub struct CountingMeter {
    deny: AtomicBool,
    authorized: Mutex<Vec<(LawyerId, u32)>>,
    reported: Mutex<Vec<(LawyerId, u32)>>,
}

impl CountingMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn denying() -> Self {
        let meter = Self::default();
        meter.deny.store(true, Ordering::SeqCst);
        meter
    }

    pub fn authorized(&self) -> Vec<(LawyerId, u32)> {
        self.authorized.lock().unwrap().clone()
    }

    pub fn reported(&self) -> Vec<(LawyerId, u32)> {
        self.reported.lock().unwrap().clone()
    }
}

#[async_trait]
impl MeteringGateway for CountingMeter {
    async fn authorize(&self, owner: LawyerId, units: u32) -> Result<(), MeteringError> {
        if self.deny.load(Ordering::SeqCst) {
            return Err(MeteringError::Denied("insufficient balance".to_string()));
        }
        self.authorized.lock().unwrap().push((owner, units));
        Ok(())
    }

    async fn report(&self, owner: LawyerId, units_consumed: u32) {
        self.reported.lock().unwrap().push((owner, units_consumed));
    }
}

/// Fully wired service over the in-memory collaborators
pub struct TestEngine {
    pub registry: Arc<ScriptedRegistry>,
    pub store: Arc<MemoryStore>,
    pub meter: Arc<CountingMeter>,
    pub service: MonitorService,
}

pub fn engine(delay_ms: u64) -> TestEngine {
    let registry = Arc::new(ScriptedRegistry::new());
    let store = Arc::new(MemoryStore::new());
    let meter = Arc::new(CountingMeter::new());
    let service = MonitorService::new(
        registry.clone(),
        store.clone(),
        meter.clone(),
        test_config(delay_ms),
    );
    TestEngine {
        registry,
        store,
        meter,
        service,
    }
}

pub fn test_config(delay_ms: u64) -> EngineConfig {
    EngineConfig {
        registry_base_url: "http://registry.test".to_string(),
        registry_timeout_ms: 1_000,
        batch_delay_ms: delay_ms,
        sweep_delay_ms: delay_ms,
    }
}

pub fn act(date: &str, kind: &str, annotation: &str) -> SnapshotActuation {
    SnapshotActuation {
        date: date.parse().unwrap(),
        kind: kind.to_string(),
        annotation: annotation.to_string(),
        start_date: None,
        end_date: None,
    }
}

pub fn snapshot(forum: Option<&str>, actuations: Vec<SnapshotActuation>) -> ProcessSnapshot {
    let most_recent_date = actuations.iter().map(|a| a.date).max();
    let most_recent_kind = actuations
        .iter()
        .max_by_key(|a| a.date)
        .map(|a| a.kind.clone());
    ProcessSnapshot {
        forum: forum.map(str::to_string),
        actuations,
        most_recent_date,
        most_recent_kind,
    }
}

/// A fresh, valid 23-digit radicado
pub fn random_docket() -> String {
    let mut rng = rand::thread_rng();
    (0..23).map(|_| rng.gen_range(0..10).to_string()).collect::<String>()
}

pub fn owner() -> LawyerId {
    Uuid::new_v4()
}
