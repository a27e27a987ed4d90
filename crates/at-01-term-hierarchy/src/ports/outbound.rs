//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the term hierarchy subsystem requires from its host.

use crate::domain::Term;
use shared_types::{StoreError, TermId};
use std::collections::BTreeSet;

/// Persistent storage for terms.
pub trait TermStore: Send + Sync {
    fn get(&self, id: TermId) -> Result<Option<Term>, StoreError>;

    /// Direct children of `parent` (`None` = roots).
    fn children_of(&self, parent: Option<TermId>) -> Result<Vec<Term>, StoreError>;

    /// Persist a new term and return its assigned id.
    fn insert(&self, term: Term) -> Result<TermId, StoreError>;

    fn update(&self, term: &Term) -> Result<(), StoreError>;

    fn delete(&self, id: TermId) -> Result<(), StoreError>;

    /// Whether a sibling under `parent` other than `exclude` already uses `slug`.
    fn slug_taken(
        &self,
        parent: Option<TermId>,
        slug: &str,
        exclude: TermId,
    ) -> Result<bool, StoreError>;

    /// Every stored term, read in one consistent pass.
    fn load_all(&self) -> Result<Vec<Term>, StoreError>;
}

/// Answers whether any tag assignment references any of the given terms.
///
/// Backed by the tag ledger; drives the SingleSelect lock.
pub trait TermUsageProbe: Send + Sync {
    fn is_any_in_use(&self, terms: &BTreeSet<TermId>) -> Result<bool, StoreError>;
}

/// Existence check handed to a slug generator.
pub type SlugExists<'a> = dyn Fn(&str) -> Result<bool, StoreError> + 'a;

/// Produces unique URL segments.
pub trait SlugGenerator: Send + Sync {
    /// Sanitise `raw`, falling back to `"{scope}-{scope_id}"` when nothing
    /// usable is left, then suffix `-2`, `-3`, ... until `exists` says no.
    fn generate(
        &self,
        raw: &str,
        scope: &str,
        scope_id: TermId,
        exists: &SlugExists<'_>,
    ) -> Result<String, StoreError>;
}

/// Produces plural display names.
pub trait Pluralizer: Send + Sync {
    fn pluralize(&self, singular: &str) -> String;
}
