//! # Engine Configuration
//!
//! Unified configuration for every subsystem of the engine.
//!
//! ## Environment Variables
//!
//! | Variable | Subsystem | Default |
//! |----------|-----------|---------|
//! | `AT_CRUMB_SEPARATOR` | hierarchy | `" ▸ "` |
//! | `AT_MAX_DEPTH` | hierarchy | `256` |
//! | `AT_SLUG_SCOPE` | slugs | `taxonomy-term` |
//! | `AT_MESSAGE_STYLE` | rules | `plain` |
//! | `AT_OWNER_TYPES` | ledger | empty |
//! | `AT_DEFAULT_TERMS` | ledger | empty |
//! | `AT_LOG_LEVEL`, `AT_JSON_LOGS`, ... | telemetry | see `at-telemetry` |

use at_01_term_hierarchy::{HierarchyConfig, SlugConfig};
use at_03_tagging_rules::RulesConfig;
use at_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use thiserror::Error;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Breadcrumb separator and maximum term depth.
    pub hierarchy: HierarchyConfig,
    /// Slug fallback scope.
    pub slugs: SlugConfig,
    /// Message rendering.
    pub rules: RulesConfig,
    /// Log output.
    pub telemetry: TelemetryConfig,
    /// Owner types registered as taggable at startup, with the default
    /// relation name.
    pub owner_types: Vec<String>,
    /// Default term slug paths per owner type, applied in order by
    /// `init_default_terms`.
    #[serde(default)]
    pub default_terms: BTreeMap<String, Vec<String>>,
}

impl EngineConfig {
    /// Load every section from the environment.
    pub fn from_env() -> Self {
        Self {
            hierarchy: HierarchyConfig::from_env(),
            slugs: SlugConfig::from_env(),
            rules: RulesConfig::from_env(),
            telemetry: TelemetryConfig::from_env(),
            owner_types: env::var("AT_OWNER_TYPES")
                .map(|list| parse_owner_types(&list))
                .unwrap_or_default(),
            default_terms: env::var("AT_DEFAULT_TERMS")
                .map(|spec| parse_default_terms(&spec))
                .unwrap_or_default(),
        }
    }

    /// Check values that would make the engine misbehave rather than fail.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the maximum depth is zero
    /// - the breadcrumb separator is empty
    /// - the slug scope is blank
    /// - default terms name an owner type that is not registered
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hierarchy.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        if self.hierarchy.crumb_separator.is_empty() {
            return Err(ConfigError::EmptyCrumbSeparator);
        }
        if self.slugs.scope_label.trim().is_empty() {
            return Err(ConfigError::BlankSlugScope);
        }
        if let Some(owner_type) = self
            .default_terms
            .keys()
            .find(|owner_type| !self.owner_types.contains(owner_type))
        {
            return Err(ConfigError::DefaultTermsForUnknownOwnerType {
                owner_type: owner_type.clone(),
            });
        }
        Ok(())
    }
}

fn parse_owner_types(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// `"Page=topic/news,format/article;File=format/pdf"`
fn parse_default_terms(spec: &str) -> BTreeMap<String, Vec<String>> {
    spec.split(';')
        .filter_map(|entry| entry.split_once('='))
        .map(|(owner_type, paths)| {
            let paths = paths
                .split(',')
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(str::to_string)
                .collect();
            (owner_type.trim().to_string(), paths)
        })
        .filter(|(owner_type, _)| !owner_type.is_empty())
        .collect()
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_depth must be at least 1")]
    ZeroMaxDepth,

    #[error("crumb_separator must not be empty")]
    EmptyCrumbSeparator,

    #[error("slug scope_label must not be blank")]
    BlankSlugScope,

    #[error("default terms configured for unregistered owner type '{owner_type}'")]
    DefaultTermsForUnknownOwnerType { owner_type: String },
}
