use crate::domain::TagAssignment;
use crate::ports::AssignmentStore;
use parking_lot::RwLock;
use shared_types::{OwnerRef, StoreError, TermId};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory implementation of `AssignmentStore`.
///
/// Rows are keyed by `(owner, term)`, so a store never holds the same tag
/// twice for one owner.
pub struct InMemoryAssignmentStore {
    rows: RwLock<BTreeMap<(OwnerRef, TermId), i64>>,
    defaults_applied: RwLock<BTreeSet<OwnerRef>>,
}

impl InMemoryAssignmentStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            defaults_applied: RwLock::new(BTreeSet::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryAssignmentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn to_assignment(((owner, term_id), sort): (&(OwnerRef, TermId), &i64)) -> TagAssignment {
    TagAssignment::new(owner.clone(), *term_id, *sort)
}

impl AssignmentStore for InMemoryAssignmentStore {
    fn for_owner(&self, owner: &OwnerRef) -> Result<Vec<TagAssignment>, StoreError> {
        Ok(self
            .rows
            .read()
            .iter()
            .filter(|((o, _), _)| o == owner)
            .map(to_assignment)
            .collect())
    }

    fn for_terms(&self, terms: &BTreeSet<TermId>) -> Result<Vec<TagAssignment>, StoreError> {
        Ok(self
            .rows
            .read()
            .iter()
            .filter(|((_, term_id), _)| terms.contains(term_id))
            .map(to_assignment)
            .collect())
    }

    fn upsert(&self, assignment: TagAssignment) -> Result<(), StoreError> {
        self.rows
            .write()
            .insert((assignment.owner, assignment.term_id), assignment.sort);
        Ok(())
    }

    fn remove(&self, owner: &OwnerRef, term_id: TermId) -> Result<bool, StoreError> {
        Ok(self
            .rows
            .write()
            .remove(&(owner.clone(), term_id))
            .is_some())
    }

    fn remove_owner(&self, owner: &OwnerRef) -> Result<usize, StoreError> {
        self.defaults_applied.write().remove(owner);
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|(o, _), _| o != owner);
        Ok(before - rows.len())
    }

    fn remove_terms(&self, terms: &BTreeSet<TermId>) -> Result<usize, StoreError> {
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|(_, term_id), _| !terms.contains(term_id));
        Ok(before - rows.len())
    }

    fn all(&self) -> Result<Vec<TagAssignment>, StoreError> {
        Ok(self.rows.read().iter().map(to_assignment).collect())
    }

    fn defaults_applied(&self, owner: &OwnerRef) -> Result<bool, StoreError> {
        Ok(self.defaults_applied.read().contains(owner))
    }

    fn mark_defaults_applied(&self, owner: &OwnerRef) -> Result<(), StoreError> {
        self.defaults_applied.write().insert(owner.clone());
        Ok(())
    }
}
