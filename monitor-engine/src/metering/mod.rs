//! Credit metering boundary
//!
//! Every sync attempt consumes provider quota, so the caller's balance is
//! authorized before any registry work and the real unit cost (one unit
//! per case actually attempted) is reported afterwards. The gateway
//! itself is an external collaborator.

use async_trait::async_trait;
use shared::models::LawyerId;
use thiserror::Error;

/// Metering gateway failures; both abort the call pre-flight
#[derive(Debug, Clone, Error)]
pub enum MeteringError {
    #[error("Insufficient balance: {0}")]
    Denied(String),

    #[error("Metering gateway unavailable: {0}")]
    Unavailable(String),
}

/// Authorizes and charges sync work
#[async_trait]
pub trait MeteringGateway: Send + Sync {
    /// Authorize `units` sync attempts for the owner. Must be called
    /// before the first registry call; denial is not retried.
    async fn authorize(&self, owner: LawyerId, units: u32) -> Result<(), MeteringError>;

    /// Report the units actually consumed (a cancelled batch reports only
    /// the cases it reached)
    async fn report(&self, owner: LawyerId, units_consumed: u32);
}

/// Pass-through gateway for deployments without billing
pub struct Unmetered;

#[async_trait]
impl MeteringGateway for Unmetered {
    async fn authorize(&self, _owner: LawyerId, _units: u32) -> Result<(), MeteringError> {
        Ok(())
    }

    async fn report(&self, owner: LawyerId, units_consumed: u32) {
        tracing::debug!(owner = %owner, units_consumed, "Unmetered sync usage");
    }
}
