//! Sync result DTOs
//!
//! Transient per-case and per-batch outcomes returned to callers. A batch
//! always describes every attempted case; callers inspect per-case
//! failures rather than assume overall success.

use serde::{Deserialize, Serialize};

use crate::models::ProcessId;

/// What triggered a batch sync; selects the pacing budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncTrigger {
    /// Explicit "sync all" request from the user
    Manual,
    /// Background "check updates" sweep
    Sweep,
}

/// Which boundary a per-case sync failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncFailureKind {
    /// Registry call failed (transport, status, malformed payload)
    Fetch,
    /// Persistence failed for this case
    Store,
}

/// Per-case failure detail, carried in the batch result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncFailure {
    pub kind: SyncFailureKind,
    pub message: String,
}

/// Outcome of syncing one case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncAttemptResult {
    pub process_id: ProcessId,
    pub docket: String,
    /// Actuations newly persisted by this attempt
    pub new_actuations: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<SyncFailure>,
}

impl SyncAttemptResult {
    pub fn succeeded(process_id: ProcessId, docket: impl Into<String>, new_actuations: u32) -> Self {
        Self {
            process_id,
            docket: docket.into(),
            new_actuations,
            failure: None,
        }
    }

    pub fn failed(
        process_id: ProcessId,
        docket: impl Into<String>,
        kind: SyncFailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            process_id,
            docket: docket.into(),
            new_actuations: 0,
            failure: Some(SyncFailure {
                kind,
                message: message.into(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Outcome of a batch sync over one owner's cases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSyncResult {
    /// Per-case results, in the order the cases were loaded
    pub attempts: Vec<SyncAttemptResult>,
    /// Sum of `new_actuations` across all attempts
    pub total_new_actuations: u32,
    /// True when a cancellation stopped the batch before the last case;
    /// `attempts` then covers only the cases actually reached.
    #[serde(default)]
    pub cancelled: bool,
}

impl BatchSyncResult {
    pub fn from_attempts(attempts: Vec<SyncAttemptResult>, cancelled: bool) -> Self {
        let total_new_actuations = attempts.iter().map(|a| a.new_actuations).sum();
        Self {
            attempts,
            total_new_actuations,
            cancelled,
        }
    }

    pub fn attempted(&self) -> u32 {
        self.attempts.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_batch_totals() {
        let id = Uuid::new_v4();
        let result = BatchSyncResult::from_attempts(
            vec![
                SyncAttemptResult::succeeded(id, "a", 3),
                SyncAttemptResult::failed(id, "b", SyncFailureKind::Fetch, "timeout"),
                SyncAttemptResult::succeeded(id, "c", 1),
            ],
            false,
        );
        assert_eq!(result.total_new_actuations, 4);
        assert_eq!(result.attempted(), 3);
        assert!(!result.cancelled);
        assert!(!result.attempts[1].is_success());
    }

    #[test]
    fn test_failure_serializes_with_kind() {
        let attempt = SyncAttemptResult::failed(
            Uuid::new_v4(),
            "11001-31-03-003-2020-00123-00",
            SyncFailureKind::Store,
            "constraint violated",
        );
        let json = serde_json::to_value(&attempt).unwrap();
        assert_eq!(json["failure"]["kind"], "store");
        assert_eq!(json["new_actuations"], 0);
    }
}
