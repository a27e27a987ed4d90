//! # Outbound Ports (Driven Ports)

use crate::domain::TagAssignment;
use at_01_term_hierarchy::TermStore;
use shared_types::{OwnerRef, StoreError, TermId};
use std::collections::BTreeSet;

/// Persistent storage for tag assignments.
///
/// Rows may come back in any order; the ledger sorts them.
pub trait AssignmentStore: Send + Sync {
    fn for_owner(&self, owner: &OwnerRef) -> Result<Vec<TagAssignment>, StoreError>;

    fn for_terms(&self, terms: &BTreeSet<TermId>) -> Result<Vec<TagAssignment>, StoreError>;

    /// Insert, or overwrite the sort of, the `(owner, term)` row.
    fn upsert(&self, assignment: TagAssignment) -> Result<(), StoreError>;

    /// Returns whether a row was removed.
    fn remove(&self, owner: &OwnerRef, term_id: TermId) -> Result<bool, StoreError>;

    /// Remove every row of the owner and its defaults-applied mark.
    fn remove_owner(&self, owner: &OwnerRef) -> Result<usize, StoreError>;

    fn remove_terms(&self, terms: &BTreeSet<TermId>) -> Result<usize, StoreError>;

    fn all(&self) -> Result<Vec<TagAssignment>, StoreError>;

    /// Whether the owner has already received its default terms.
    fn defaults_applied(&self, owner: &OwnerRef) -> Result<bool, StoreError>;

    fn mark_defaults_applied(&self, owner: &OwnerRef) -> Result<(), StoreError>;
}

/// Answers whether a term exists.
pub trait TermDirectory: Send + Sync {
    fn term_exists(&self, term_id: TermId) -> Result<bool, StoreError>;
}

impl<S: TermStore> TermDirectory for S {
    fn term_exists(&self, term_id: TermId) -> Result<bool, StoreError> {
        Ok(self.get(term_id)?.is_some())
    }
}

/// Answers whether an owning object exists. Implemented by the host.
pub trait OwnerDirectory: Send + Sync {
    fn owner_exists(&self, owner: &OwnerRef) -> Result<bool, StoreError>;
}
