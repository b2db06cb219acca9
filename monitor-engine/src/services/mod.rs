//! Service layer
//!
//! Entry points used by calling code (API handlers, background jobs).

pub mod monitor_service;

pub use monitor_service::MonitorService;
