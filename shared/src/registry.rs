//! Registry snapshot types
//!
//! Normalized view of what the judicial registry reports for one case.
//! Produced by the registry adapter after boundary validation; the raw
//! provider payload never crosses into the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ActuationKey;

/// One actuation as fetched from the registry (not yet persisted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotActuation {
    pub date: NaiveDate,
    pub kind: String,
    #[serde(default)]
    pub annotation: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SnapshotActuation {
    pub fn key(&self) -> ActuationKey {
        ActuationKey::new(self.date, &self.annotation)
    }

    /// Text used for the denormalized last-actuation description
    pub fn description(&self) -> &str {
        if self.annotation.is_empty() {
            &self.kind
        } else {
            &self.annotation
        }
    }
}

/// Snapshot of one case as known to the registry
///
/// A docket unknown to the provider yields `ProcessSnapshot::empty()`;
/// absence is a valid answer, not a fetch failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    /// Court/chamber handling the case ("despacho")
    pub forum: Option<String>,
    pub actuations: Vec<SnapshotActuation>,
    /// Most recent actuation date as reported by the provider header
    pub most_recent_date: Option<NaiveDate>,
    pub most_recent_kind: Option<String>,
}

impl ProcessSnapshot {
    pub fn empty() -> Self {
        Self {
            forum: None,
            actuations: Vec::new(),
            most_recent_date: None,
            most_recent_kind: None,
        }
    }

    /// True when the provider knows nothing about the docket
    pub fn is_empty(&self) -> bool {
        self.forum.is_none() && self.actuations.is_empty()
    }

    /// Most recent actuation in the fetched list (by date)
    pub fn most_recent(&self) -> Option<&SnapshotActuation> {
        self.actuations.iter().max_by_key(|a| a.date)
    }
}
