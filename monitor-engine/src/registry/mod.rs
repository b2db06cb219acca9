//! Judicial registry boundary
//!
//! Adapter over the external registry provider. Returns a normalized
//! [`ProcessSnapshot`] per docket; "case not found" is a successful empty
//! snapshot, not an error. No retries at this layer: retry policy belongs
//! to the caller so batch pacing stays predictable.

pub mod http;

pub use http::HttpRegistryClient;

use async_trait::async_trait;
use shared::registry::ProcessSnapshot;
use thiserror::Error;

/// Registry fetch failures (distinct from "docket unknown", which is a
/// successful empty snapshot)
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Registry request failed: {0}")]
    Transport(String),

    #[error("Registry returned status {0}")]
    Status(u16),

    /// HTTP 429, surfaced so callers can see provider backpressure
    #[error("Registry throttled the request")]
    Throttled,

    #[error("Malformed registry payload: {0}")]
    MalformedPayload(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Transport("request timed out".to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Result type for registry operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Data provider boundary: one normalized snapshot per docket
#[async_trait]
pub trait RegistryClient: Send + Sync {
    async fn fetch_by_docket(&self, docket: &str) -> FetchResult<ProcessSnapshot>;
}
