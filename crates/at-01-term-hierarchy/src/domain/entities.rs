//! # Domain Entities
//!
//! The taxonomy term and the flag bundle every term inherits from its root.
//!
//! ## Invariants
//!
//! - A root term (`parent_id == None`) is a *type*; once saved its `type_id`
//!   equals its own `id`.
//! - A non-root term carries the `type_id`, `single_select` and
//!   `internal_only` values of its root. These are re-derived on every write
//!   and pushed down the tree when a root changes.
//! - `required_types` only ever reference root terms.

use serde::{Deserialize, Serialize};
use shared_types::TermId;
use std::collections::BTreeSet;

/// A node in a taxonomy tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Store-assigned identifier, `TermId::UNSAVED` before the first write.
    pub id: TermId,
    /// Parent term, `None` for a root.
    pub parent_id: Option<TermId>,
    /// Identifier of the tree root this term belongs to.
    pub type_id: TermId,
    /// Short machine-usable label.
    pub name: String,
    /// Singular display name, back-filled from `name`.
    pub title: String,
    /// Plural display name, back-filled by the pluralizer.
    pub title_plural: String,
    /// Slug, unique among siblings, back-filled by the slug generator.
    pub url_segment: String,
    pub description: String,
    /// Definition shown to content authors.
    pub author_definition: String,
    /// Definition shown to end users.
    pub public_definition: String,
    /// Read from the root: at most one term of this tree per tagged object.
    pub single_select: bool,
    /// Read from the root: the taxonomy is hidden from end users.
    pub internal_only: bool,
    /// Whether the root's required types also apply to this term.
    pub required_types_inherit_root: bool,
    /// Root terms that must be represented whenever this term is a tag.
    pub required_types: BTreeSet<TermId>,
    /// Ordering key among siblings.
    pub sort: i64,
}

impl Term {
    /// Create an unsaved term with the given name and default flags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TermId::UNSAVED,
            parent_id: None,
            type_id: TermId::UNSAVED,
            name: name.into(),
            title: String::new(),
            title_plural: String::new(),
            url_segment: String::new(),
            description: String::new(),
            author_definition: String::new(),
            public_definition: String::new(),
            single_select: false,
            internal_only: false,
            required_types_inherit_root: true,
            required_types: BTreeSet::new(),
            sort: 0,
        }
    }

    pub fn with_parent(mut self, parent_id: TermId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_title_plural(mut self, title_plural: impl Into<String>) -> Self {
        self.title_plural = title_plural.into();
        self
    }

    pub fn with_url_segment(mut self, url_segment: impl Into<String>) -> Self {
        self.url_segment = url_segment.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_sort(mut self, sort: i64) -> Self {
        self.sort = sort;
        self
    }

    pub fn single_select(mut self, value: bool) -> Self {
        self.single_select = value;
        self
    }

    pub fn internal_only(mut self, value: bool) -> Self {
        self.internal_only = value;
        self
    }

    pub fn inherit_root_required_types(mut self, value: bool) -> Self {
        self.required_types_inherit_root = value;
        self
    }

    /// Add a required type (a root term of another tree).
    pub fn requires(mut self, type_id: TermId) -> Self {
        self.required_types.insert(type_id);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_saved()
    }

    /// The values this term hands down to its descendants.
    pub fn inherited_flags(&self) -> InheritedFlags {
        InheritedFlags {
            type_id: self.type_id,
            single_select: self.single_select,
            internal_only: self.internal_only,
        }
    }

    /// Render a root term as `"Name (Single|Multi; Shown|Hidden)"`.
    pub fn type_label(&self) -> String {
        format!(
            "{} ({}; {})",
            self.name,
            if self.single_select { "Single" } else { "Multi" },
            if self.internal_only { "Hidden" } else { "Shown" }
        )
    }
}

/// Root-level values copied onto every node of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InheritedFlags {
    pub type_id: TermId,
    pub single_select: bool,
    pub internal_only: bool,
}

impl InheritedFlags {
    pub fn apply_to(self, term: &mut Term) {
        term.type_id = self.type_id;
        term.single_select = self.single_select;
        term.internal_only = self.internal_only;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_term_defaults() {
        let term = Term::new("Colour");
        assert!(!term.is_saved());
        assert!(term.is_root());
        assert!(term.required_types_inherit_root);
        assert!(!term.single_select);
        assert!(!term.internal_only);
        assert!(term.title.is_empty());
    }

    #[test]
    fn test_builder_sets_requirements() {
        let term = Term::new("Format")
            .requires(TermId(4))
            .requires(TermId(4))
            .inherit_root_required_types(false);
        assert_eq!(term.required_types.len(), 1);
        assert!(!term.required_types_inherit_root);
    }

    #[test]
    fn test_type_label() {
        let colour = Term::new("Colour").single_select(true);
        assert_eq!(colour.type_label(), "Colour (Single; Shown)");

        let audit = Term::new("Audit").internal_only(true);
        assert_eq!(audit.type_label(), "Audit (Multi; Hidden)");
    }

    #[test]
    fn test_inherited_flags_apply() {
        let mut root = Term::new("Colour").single_select(true).internal_only(true);
        root.id = TermId(1);
        root.type_id = TermId(1);

        let mut child = Term::new("Red").with_parent(TermId(1));
        root.inherited_flags().apply_to(&mut child);

        assert_eq!(child.type_id, TermId(1));
        assert!(child.single_select);
        assert!(child.internal_only);
    }

    #[test]
    fn test_term_serializes_required_types() {
        let term = Term::new("Format").requires(TermId(2)).requires(TermId(1));
        let json = serde_json::to_value(&term).unwrap();
        assert_eq!(json["required_types"], serde_json::json!([1, 2]));
        assert_eq!(json["parent_id"], serde_json::Value::Null);
    }
}
