//! Actuation Model
//!
//! A single procedural event recorded against a case by the judicial
//! system (a ruling, a notice, a hearing date...).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::process::ProcessId;

/// Stored actuation row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actuation {
    pub id: Uuid,
    pub process_id: ProcessId,
    pub date: NaiveDate,
    /// Actuation type/name as reported by the registry ("Auto", "Fijación estado"...)
    pub kind: String,
    /// Free-text annotation. May be empty; still part of the identity key.
    #[serde(default)]
    pub annotation: String,
    /// Term window for deadline-type actuations
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Set at insert for notification-path rows; cleared downstream once
    /// surfaced to the user, never by the sync engine.
    pub is_new: bool,
    pub created_at: DateTime<Utc>,
}

impl Actuation {
    pub fn key(&self) -> ActuationKey {
        ActuationKey::new(self.date, &self.annotation)
    }
}

/// Identity key of an actuation within one process.
///
/// The registry guarantees no external unique id, so (date, annotation) IS
/// the identity contract: two fetched records sharing both fields for the
/// same case are the same event. The type field is deliberately excluded
/// to stay compatible with rows already stored; two same-day events with
/// identical annotations but different types collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActuationKey {
    pub date: NaiveDate,
    pub annotation: String,
}

impl ActuationKey {
    pub fn new(date: NaiveDate, annotation: impl Into<String>) -> Self {
        Self {
            date,
            annotation: annotation.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_key_ignores_kind() {
        let base = Actuation {
            id: Uuid::new_v4(),
            process_id: Uuid::new_v4(),
            date: date("2020-01-15"),
            kind: "Auto".to_string(),
            annotation: "Admite demanda".to_string(),
            start_date: None,
            end_date: None,
            is_new: true,
            created_at: Utc::now(),
        };
        let mut other = base.clone();
        other.kind = "Fijación estado".to_string();

        assert_eq!(base.key(), other.key());
    }

    #[test]
    fn test_empty_annotation_is_identity_material() {
        let a = ActuationKey::new(date("2020-01-15"), "");
        let b = ActuationKey::new(date("2020-01-15"), "");
        let c = ActuationKey::new(date("2020-01-16"), "");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
