//! Runtime bootstrap: configuration, telemetry, engine.

use crate::config::EngineConfig;
use crate::engine::InMemoryEngine;
use anyhow::{Context, Result};
use at_telemetry::{init_telemetry, TelemetryError, TelemetryGuard};
use std::sync::Arc;
use tracing::{info, warn};

/// A configured engine plus the telemetry guard that keeps logging alive.
pub struct TaxonomyRuntime {
    config: EngineConfig,
    engine: Arc<InMemoryEngine>,
    _telemetry: Option<TelemetryGuard>,
}

impl TaxonomyRuntime {
    /// Startup sequence:
    ///
    /// 1. Validate the configuration
    /// 2. Install the log subscriber (an already installed one is kept)
    /// 3. Wire the engine and register the configured owner types
    pub fn bootstrap(config: EngineConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid engine configuration")?;

        let telemetry = match init_telemetry(&config.telemetry) {
            Ok(guard) => Some(guard),
            Err(TelemetryError::SubscriberInit(reason)) => {
                warn!(%reason, "[runtime] Keeping the existing log subscriber");
                None
            }
            Err(err) => return Err(err).context("Failed to initialise telemetry"),
        };

        info!("===========================================");
        info!("  Advanced Taxonomies engine starting");
        info!("===========================================");

        let engine = Arc::new(InMemoryEngine::in_memory(&config));
        info!(
            owner_types = config.owner_types.len(),
            max_depth = config.hierarchy.max_depth,
            message_style = %config.rules.message_style,
            "[runtime] Taxonomy engine ready"
        );

        Ok(Self {
            config,
            engine,
            _telemetry: telemetry,
        })
    }

    /// Bootstrap from `EngineConfig::from_env()`.
    pub fn from_env() -> Result<Self> {
        Self::bootstrap(EngineConfig::from_env())
    }

    pub fn engine(&self) -> &Arc<InMemoryEngine> {
        &self.engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
