//! # Value Objects
//!
//! Configuration for hierarchy walks and slug generation.

use serde::{Deserialize, Serialize};
use std::env;

/// Default separator used by hierarchy-path strings.
pub const DEFAULT_CRUMB_SEPARATOR: &str = " ▸ ";

/// Default ceiling on the number of ancestors a term may have.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration for hierarchy reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Separator placed between names in breadcrumb strings.
    pub crumb_separator: String,
    /// Most ancestors a new term may have; deeper creates are refused.
    pub max_depth: usize,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            crumb_separator: DEFAULT_CRUMB_SEPARATOR.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl HierarchyConfig {
    /// Read overrides from the environment.
    ///
    /// - `AT_CRUMB_SEPARATOR`: breadcrumb separator (default: ` ▸ `)
    /// - `AT_MAX_DEPTH`: deepest allowed term on create (default: 256)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            crumb_separator: env::var("AT_CRUMB_SEPARATOR").unwrap_or(defaults.crumb_separator),
            max_depth: env::var("AT_MAX_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|depth| *depth > 0)
                .unwrap_or(defaults.max_depth),
        }
    }
}

/// Configuration for slug generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugConfig {
    /// Prefix of the `"{scope}-{id}"` fallback slug.
    pub scope_label: String,
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self {
            scope_label: "taxonomy-term".to_string(),
        }
    }
}

impl SlugConfig {
    /// Read `AT_SLUG_SCOPE` from the environment (default: `taxonomy-term`).
    pub fn from_env() -> Self {
        env::var("AT_SLUG_SCOPE")
            .ok()
            .filter(|scope| !scope.trim().is_empty())
            .map(|scope_label| Self { scope_label })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_config_default() {
        let config = HierarchyConfig::default();
        assert_eq!(config.crumb_separator, " ▸ ");
        assert_eq!(config.max_depth, 256);
    }

    #[test]
    fn test_slug_config_default() {
        assert_eq!(SlugConfig::default().scope_label, "taxonomy-term");
    }
}
