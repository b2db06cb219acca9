//! Engine configuration
//!
//! All knobs can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | REGISTRY_BASE_URL | https://consultaprocesos.ramajudicial.gov.co:448/api/v2 | Judicial registry API base |
//! | REGISTRY_TIMEOUT_MS | 30000 | Outbound request timeout (ms) |
//! | SYNC_BATCH_DELAY_MS | 300 | Inter-case pacing for explicit "sync all" (ms) |
//! | SYNC_SWEEP_DELAY_MS | 500 | Inter-case pacing for background sweeps (ms) |

use std::time::Duration;

use shared::sync::SyncTrigger;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the judicial registry API
    pub registry_base_url: String,
    /// Outbound request timeout (milliseconds)
    pub registry_timeout_ms: u64,
    /// Pacing delay between cases for explicit "sync all" requests (milliseconds)
    pub batch_delay_ms: u64,
    /// Pacing delay between cases for background "check updates" sweeps (milliseconds)
    pub sweep_delay_ms: u64,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            registry_base_url: std::env::var("REGISTRY_BASE_URL").unwrap_or_else(|_| {
                "https://consultaprocesos.ramajudicial.gov.co:448/api/v2".into()
            }),
            registry_timeout_ms: std::env::var("REGISTRY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30_000),
            batch_delay_ms: std::env::var("SYNC_BATCH_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            sweep_delay_ms: std::env::var("SYNC_SWEEP_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
        }
    }

    /// Pacing budget for a batch, by trigger
    ///
    /// The external registry is a scarce, rate-limited resource; serial
    /// pacing trades latency for reliability.
    pub fn pacing(&self, trigger: SyncTrigger) -> Duration {
        let ms = match trigger {
            SyncTrigger::Manual => self.batch_delay_ms,
            SyncTrigger::Sweep => self.sweep_delay_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.registry_timeout_ms)
    }

    /// Override the pacing delays, mostly for tests
    pub fn with_delays(mut self, batch_delay_ms: u64, sweep_delay_ms: u64) -> Self {
        self.batch_delay_ms = batch_delay_ms;
        self.sweep_delay_ms = sweep_delay_ms;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
