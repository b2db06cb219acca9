//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and
//! production environments. Console output always; optionally a daily
//! rotating file appender for deployments that keep local logs.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - Whether to use JSON format (true for production, false for development)
/// * `log_dir` - Optional directory for daily rotating file logs
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    // Daily rotating appender, written under <log_dir>/app/
    let appender = match log_dir {
        Some(dir) => {
            let app_log_dir = Path::new(dir).join("app");
            fs::create_dir_all(&app_log_dir)?;
            Some(RollingFileAppender::new(Rotation::DAILY, app_log_dir, "monitor"))
        }
        None => None,
    };

    if json_format {
        // JSON format for production
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true);
        let file_layer = appender.map(|app_log| {
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::sync::Mutex::new(app_log))
        });
        subscriber.with(console_layer).with(file_layer).init();
    } else {
        // Pretty format for development
        let console_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        let file_layer = appender.map(|app_log| {
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(app_log))
        });
        subscriber.with(console_layer).with(file_layer).init();
    }

    Ok(())
}

/// Initialize the logging system (console only)
///
/// Convenience function for console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}
