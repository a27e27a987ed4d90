//! # Owner Registry
//!
//! Explicit registration of taggable owner types. A host registers every
//! entity type that carries tags, with the name of its tag relation, once at
//! startup. The ledger refuses writes for anything else.
//!
//! A registered type may also list default terms by slug path
//! (`"information-type/news"`); new owners of that type start out tagged
//! with them.

use serde::{Deserialize, Serialize};
use shared_types::OwnerType;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Relation name used when none is given.
pub const DEFAULT_RELATION: &str = "Tags";

/// Table of taggable owner types and their tag relation names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRegistry {
    relations: BTreeMap<OwnerType, String>,
    #[serde(default)]
    default_terms: BTreeMap<OwnerType, Vec<String>>,
}

impl OwnerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an owner type. Returns `true` if it replaced an earlier entry.
    pub fn register(&mut self, owner_type: OwnerType, relation_name: impl Into<String>) -> bool {
        let relation_name = relation_name.into();
        info!(
            owner_type = %owner_type,
            relation = %relation_name,
            "[at-02] Registering taggable owner type"
        );

        let replaced = self.relations.insert(owner_type.clone(), relation_name);
        if replaced.is_some() {
            warn!(owner_type = %owner_type, "[at-02] Owner type already registered, replacing");
        }
        replaced.is_some()
    }

    pub fn unregister(&mut self, owner_type: &OwnerType) -> bool {
        self.default_terms.remove(owner_type);
        self.relations.remove(owner_type).is_some()
    }

    /// Set the default term slug paths of a registered owner type, in the
    /// order they are applied. Returns `false` if the type is not registered.
    pub fn set_default_terms(&mut self, owner_type: &OwnerType, paths: Vec<String>) -> bool {
        if !self.is_registered(owner_type) {
            return false;
        }
        debug!(
            owner_type = %owner_type,
            paths = paths.len(),
            "[at-02] Default terms configured"
        );
        self.default_terms.insert(owner_type.clone(), paths);
        true
    }

    /// Default term slug paths of an owner type; empty if none are set.
    pub fn default_terms(&self, owner_type: &OwnerType) -> &[String] {
        self.default_terms
            .get(owner_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_registered(&self, owner_type: &OwnerType) -> bool {
        self.relations.contains_key(owner_type)
    }

    pub fn relation_name(&self, owner_type: &OwnerType) -> Option<&str> {
        self.relations.get(owner_type).map(String::as_str)
    }

    pub fn owner_types(&self) -> impl Iterator<Item = &OwnerType> {
        self.relations.keys()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = OwnerRegistry::new();
        assert!(!registry.register(OwnerType::new("Page"), DEFAULT_RELATION));
        assert!(registry.register(OwnerType::new("Page"), "Topics"));

        assert!(registry.is_registered(&OwnerType::new("Page")));
        assert_eq!(registry.relation_name(&"Page".into()), Some("Topics"));
        assert!(!registry.is_registered(&OwnerType::new("File")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister() {
        let mut registry = OwnerRegistry::new();
        registry.register("File".into(), DEFAULT_RELATION);
        registry.set_default_terms(&"File".into(), vec!["format/pdf".to_string()]);
        assert!(registry.unregister(&"File".into()));
        assert!(registry.is_empty());
        assert!(registry.default_terms(&"File".into()).is_empty());
    }

    #[test]
    fn test_default_terms_need_registration() {
        let mut registry = OwnerRegistry::new();
        let paths = vec!["topic/news".to_string(), "format/article".to_string()];
        assert!(!registry.set_default_terms(&"Page".into(), paths.clone()));
        assert!(registry.default_terms(&"Page".into()).is_empty());

        registry.register("Page".into(), DEFAULT_RELATION);
        assert!(registry.set_default_terms(&"Page".into(), paths.clone()));
        assert_eq!(registry.default_terms(&"Page".into()), paths.as_slice());
    }
}
