//! Monitored Process Model
//!
//! A judicial process (case) a lawyer tracks by its docket number
//! ("radicado"). The denormalized last-actuation fields are written only
//! by the sync engine, never by callers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub type ProcessId = Uuid;
pub type LawyerId = Uuid;

/// Number of digits in a valid radicado (Rama Judicial format)
pub const RADICADO_DIGITS: usize = 23;

/// Lifecycle state of a monitored process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    Active,
    Terminated,
    Suspended,
}

impl Default for ProcessStatus {
    fn default() -> Self {
        ProcessStatus::Active
    }
}

/// Monitored process row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoredProcess {
    pub id: ProcessId,
    pub owner_id: LawyerId,
    /// Docket number ("radicado"), unique per owner
    pub docket: String,
    /// Court/chamber handling the case, filled from the registry
    pub forum: Option<String>,
    pub case_type: Option<String>,
    pub plaintiff: Option<String>,
    pub defendant: Option<String>,
    #[serde(default)]
    pub status: ProcessStatus,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    /// Denormalized cache: date of the most recent known actuation
    pub last_actuation_date: Option<NaiveDate>,
    /// Denormalized cache: description of the most recent known actuation
    pub last_actuation_desc: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl MonitoredProcess {
    /// Build a fresh process row from a registration request
    pub fn from_request(owner_id: LawyerId, req: &NewMonitor) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            docket: req.docket.clone(),
            forum: None,
            case_type: req.case_type.clone(),
            plaintiff: req.plaintiff.clone(),
            defendant: req.defendant.clone(),
            status: ProcessStatus::Active,
            notifications_enabled: true,
            last_actuation_date: None,
            last_actuation_desc: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this process participates in batch synchronization
    pub fn is_syncable(&self) -> bool {
        self.status == ProcessStatus::Active && self.notifications_enabled
    }
}

/// Registration request for a new monitored process
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMonitor {
    #[validate(custom(function = "validate_radicado"))]
    pub docket: String,
    pub case_type: Option<String>,
    pub plaintiff: Option<String>,
    pub defendant: Option<String>,
    /// Seed actuations from the registry right after registration
    #[serde(default = "default_true")]
    pub seed_on_create: bool,
}

impl NewMonitor {
    pub fn new(docket: impl Into<String>) -> Self {
        Self {
            docket: docket.into(),
            case_type: None,
            plaintiff: None,
            defendant: None,
            seed_on_create: true,
        }
    }
}

/// Radicado format check: 23 digits, separator dashes allowed
pub fn validate_radicado(docket: &str) -> Result<(), ValidationError> {
    if docket.chars().any(|c| !c.is_ascii_digit() && c != '-') {
        return Err(ValidationError::new("radicado_charset"));
    }
    let digits = docket.chars().filter(char::is_ascii_digit).count();
    if digits != RADICADO_DIGITS {
        return Err(ValidationError::new("radicado_length"));
    }
    Ok(())
}
