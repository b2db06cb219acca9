//! Unified Error Handling
//!
//! Application-wide error type for the monitoring engine. Per-case sync
//! failures do NOT travel through this type; they are folded into each
//! case's `SyncAttemptResult` so one bad case never aborts a batch. Only
//! pre-flight failures (authorization, ownership, validation, owner
//! loading) surface here.

use crate::metering::MeteringError;
use crate::registry::FetchError;
use crate::store::StoreError;

/// Engine-level error type
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    // ========== Pre-flight Errors ==========
    #[error("Authorization denied: {0}")]
    AuthorizationDenied(#[from] MeteringError),

    #[error("Process not found: {0}")]
    NotFound(String),

    #[error("Caller does not own process: {0}")]
    Ownership(String),

    #[error("Docket already monitored: {0}")]
    Duplicate(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== Boundary Errors ==========
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for engine operations
pub type MonitorResult<T> = Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metering_denial_maps_to_authorization_denied() {
        let err: MonitorError = MeteringError::Denied("insufficient balance".to_string()).into();
        assert!(matches!(err, MonitorError::AuthorizationDenied(_)));
        assert!(err.to_string().contains("insufficient balance"));
    }

    #[test]
    fn test_fetch_error_is_transparent() {
        let err: MonitorError = FetchError::Status(502).into();
        assert_eq!(err.to_string(), FetchError::Status(502).to_string());
    }
}
