//! # Taxonomy Telemetry
//!
//! Structured logging for the taxonomy engine, built on `tracing` and
//! `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use at_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let _guard = init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AT_SERVICE_NAME` | `advanced-taxonomies` | Service name in logs |
//! | `AT_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `AT_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `AT_JSON_LOGS` | `false` | JSON formatted logs |

mod config;
mod logging;
mod subscriber;

pub use config::TelemetryConfig;
pub use subscriber::build_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install log subscriber: {0}")]
    SubscriberInit(String),
}

/// Install the global log subscriber.
///
/// Returns a guard to hold for the lifetime of the application. Calling this
/// a second time in one process returns `TelemetryError::SubscriberInit`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    subscriber::init_subscriber(config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
    })
}

/// Guard that keeps telemetry active.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}
