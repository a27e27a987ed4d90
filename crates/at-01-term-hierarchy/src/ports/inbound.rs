//! # Inbound Ports (Driving Ports)
//!
//! Public API exposed by the term hierarchy subsystem.

use crate::domain::{HierarchyResult, Term, TermForest};
use shared_types::TermId;

/// Term lifecycle and hierarchy reads.
pub trait TaxonomyApi {
    /// Create a term, back-filling title, plural title and slug.
    ///
    /// ## Returns
    ///
    /// - `Ok(Term)`: the saved term with its identity and derived fields
    /// - `Err(ParentNotFound)`: the parent does not exist
    /// - `Err(EmptyName)`: the name is blank
    fn create_term(&self, term: Term) -> HierarchyResult<Term>;

    /// Update a saved term and push root flags down its subtree.
    ///
    /// ## Returns
    ///
    /// - `Err(SingleSelectLocked)`: SingleSelect changed while the tree is in use
    /// - `Err(ReparentUnsupported)`: the parent link changed
    fn update_term(&self, term: Term) -> HierarchyResult<Term>;

    /// Delete a term and all of its descendants.
    ///
    /// Returns every deleted id, deepest first, so callers can cascade.
    fn delete_term(&self, id: TermId) -> HierarchyResult<Vec<TermId>>;

    fn get_term(&self, id: TermId) -> HierarchyResult<Term>;

    /// A consistent snapshot of every term.
    fn forest(&self) -> HierarchyResult<TermForest>;

    /// Whether SingleSelect of a type can no longer change.
    fn is_single_select_locked(&self, type_id: TermId) -> HierarchyResult<bool>;
}
