//! Tag ledger service.
//!
//! Owns the owner-type registry and implements `TagLedgerApi` over an
//! `AssignmentStore`. Ledger writes are serialised so "append after the
//! last tag" never hands out the same sort position twice.

use crate::domain::{
    LedgerError, LedgerResult, Orphan, OrphanReason, OwnerRegistry, TagAssignment,
};
use crate::ports::inbound::TagLedgerApi;
use crate::ports::outbound::{AssignmentStore, OwnerDirectory, TermDirectory};
use at_01_term_hierarchy::TermUsageProbe;
use parking_lot::{Mutex, RwLock};
use shared_types::{OwnerRef, OwnerType, StoreError, TermId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Tag assignment ledger.
pub struct TagLedger<A: AssignmentStore, T: TermDirectory> {
    store: Arc<A>,
    terms: Arc<T>,
    registry: RwLock<OwnerRegistry>,
    writes: Mutex<()>,
}

impl<A: AssignmentStore, T: TermDirectory> TagLedger<A, T> {
    pub fn new(store: Arc<A>, terms: Arc<T>) -> Self {
        Self::with_registry(store, terms, OwnerRegistry::new())
    }

    pub fn with_registry(store: Arc<A>, terms: Arc<T>, registry: OwnerRegistry) -> Self {
        Self {
            store,
            terms,
            registry: RwLock::new(registry),
            writes: Mutex::new(()),
        }
    }

    /// Register a taggable owner type with its tag relation name.
    pub fn register_owner_type(
        &self,
        owner_type: impl Into<OwnerType>,
        relation_name: impl Into<String>,
    ) -> bool {
        self.registry
            .write()
            .register(owner_type.into(), relation_name)
    }

    pub fn is_registered(&self, owner_type: &OwnerType) -> bool {
        self.registry.read().is_registered(owner_type)
    }

    /// Configure the default term slug paths of a registered owner type.
    pub fn set_default_terms(
        &self,
        owner_type: impl Into<OwnerType>,
        paths: Vec<String>,
    ) -> LedgerResult<()> {
        let owner_type = owner_type.into();
        if !self.registry.write().set_default_terms(&owner_type, paths) {
            return Err(LedgerError::UnregisteredOwnerType { owner_type });
        }
        Ok(())
    }

    pub fn default_terms(&self, owner_type: &OwnerType) -> Vec<String> {
        self.registry.read().default_terms(owner_type).to_vec()
    }

    pub fn registry(&self) -> OwnerRegistry {
        self.registry.read().clone()
    }

    pub fn store(&self) -> &Arc<A> {
        &self.store
    }

    fn ensure_registered(&self, owner: &OwnerRef) -> LedgerResult<()> {
        if !self.is_registered(&owner.owner_type) {
            return Err(LedgerError::UnregisteredOwnerType {
                owner_type: owner.owner_type.clone(),
            });
        }
        Ok(())
    }

    fn ensure_term(&self, term_id: TermId) -> LedgerResult<()> {
        if !self.terms.term_exists(term_id)? {
            return Err(LedgerError::TermNotFound { term_id });
        }
        Ok(())
    }

    fn sorted(mut rows: Vec<TagAssignment>) -> Vec<TagAssignment> {
        rows.sort_by_key(|row| (row.sort, row.term_id));
        rows
    }

    /// Append after the owner's last tag; callers hold `writes`. Returns the
    /// row and whether it is new.
    fn append_locked(&self, owner: &OwnerRef, term_id: TermId) -> LedgerResult<(TagAssignment, bool)> {
        let current = self.store.for_owner(owner)?;
        if let Some(existing) = current.iter().find(|row| row.term_id == term_id) {
            return Ok((existing.clone(), false));
        }

        let sort = current.iter().map(|row| row.sort).max().unwrap_or(0) + 1;
        let assignment = TagAssignment::new(owner.clone(), term_id, sort);
        self.store.upsert(assignment.clone())?;
        Ok((assignment, true))
    }
}

impl<A: AssignmentStore, T: TermDirectory> TagLedgerApi for TagLedger<A, T> {
    fn assignments(&self, owner: &OwnerRef) -> LedgerResult<Vec<TagAssignment>> {
        Ok(Self::sorted(self.store.for_owner(owner)?))
    }

    fn terms_of(&self, owner: &OwnerRef) -> LedgerResult<Vec<TermId>> {
        Ok(self
            .assignments(owner)?
            .into_iter()
            .map(|row| row.term_id)
            .collect())
    }

    fn add(&self, owner: &OwnerRef, term_id: TermId) -> LedgerResult<TagAssignment> {
        self.ensure_registered(owner)?;
        self.ensure_term(term_id)?;

        let _guard = self.writes.lock();
        let (assignment, added) = self.append_locked(owner, term_id)?;
        if added {
            debug!(owner = %owner, term_id = %term_id, sort = assignment.sort, "[at-02] Tag added");
        }
        Ok(assignment)
    }

    fn apply_defaults(
        &self,
        owner: &OwnerRef,
        terms: &[TermId],
    ) -> LedgerResult<Option<Vec<TagAssignment>>> {
        self.ensure_registered(owner)?;
        for term_id in terms {
            self.ensure_term(*term_id)?;
        }

        let _guard = self.writes.lock();
        if self.store.defaults_applied(owner)? {
            return Ok(None);
        }

        let mut added = Vec::new();
        for term_id in terms {
            let (assignment, new) = self.append_locked(owner, *term_id)?;
            if new {
                added.push(assignment);
            }
        }
        self.store.mark_defaults_applied(owner)?;

        info!(owner = %owner, added = added.len(), "[at-02] Default tags applied");
        Ok(Some(added))
    }

    fn remove(&self, owner: &OwnerRef, term_id: TermId) -> LedgerResult<bool> {
        self.ensure_registered(owner)?;
        let _guard = self.writes.lock();
        let removed = self.store.remove(owner, term_id)?;
        if removed {
            debug!(owner = %owner, term_id = %term_id, "[at-02] Tag removed");
        }
        Ok(removed)
    }

    fn reorder(&self, owner: &OwnerRef, order: &[TermId]) -> LedgerResult<()> {
        self.ensure_registered(owner)?;
        let _guard = self.writes.lock();

        let current: BTreeSet<TermId> = self
            .store
            .for_owner(owner)?
            .into_iter()
            .map(|row| row.term_id)
            .collect();
        let requested: BTreeSet<TermId> = order.iter().copied().collect();
        if requested.len() != order.len() || requested != current {
            return Err(LedgerError::ReorderMismatch {
                owner: owner.clone(),
                expected: current.len(),
            });
        }

        for (position, term_id) in order.iter().enumerate() {
            self.store
                .upsert(TagAssignment::new(owner.clone(), *term_id, position as i64 + 1))?;
        }
        Ok(())
    }

    fn replace(&self, owner: &OwnerRef, terms: &[TermId]) -> LedgerResult<Vec<TagAssignment>> {
        self.ensure_registered(owner)?;
        for term_id in terms {
            self.ensure_term(*term_id)?;
        }

        let _guard = self.writes.lock();
        let mut seen = BTreeSet::new();
        let wanted: Vec<TermId> = terms.iter().copied().filter(|id| seen.insert(*id)).collect();

        for row in self.store.for_owner(owner)? {
            if !seen.contains(&row.term_id) {
                self.store.remove(owner, row.term_id)?;
            }
        }

        let mut rows = Vec::with_capacity(wanted.len());
        for (position, term_id) in wanted.into_iter().enumerate() {
            let row = TagAssignment::new(owner.clone(), term_id, position as i64 + 1);
            self.store.upsert(row.clone())?;
            rows.push(row);
        }

        info!(owner = %owner, tags = rows.len(), "[at-02] Replaced tag list");
        Ok(rows)
    }

    fn tagged_owners(&self, term_id: TermId) -> LedgerResult<BTreeSet<OwnerRef>> {
        self.tagged_owners_of_any(&BTreeSet::from([term_id]))
    }

    fn tagged_owners_of_any(&self, terms: &BTreeSet<TermId>) -> LedgerResult<BTreeSet<OwnerRef>> {
        Ok(self
            .store
            .for_terms(terms)?
            .into_iter()
            .map(|row| row.owner)
            .collect())
    }

    fn count_for_terms(&self, terms: &BTreeSet<TermId>) -> LedgerResult<usize> {
        Ok(self.store.for_terms(terms)?.len())
    }

    fn remove_owner(&self, owner: &OwnerRef) -> LedgerResult<usize> {
        let _guard = self.writes.lock();
        let removed = self.store.remove_owner(owner)?;
        info!(owner = %owner, removed, "[at-02] Removed tags of deleted owner");
        Ok(removed)
    }

    fn remove_for_terms(&self, terms: &BTreeSet<TermId>) -> LedgerResult<usize> {
        if terms.is_empty() {
            return Ok(0);
        }
        let _guard = self.writes.lock();
        let removed = self.store.remove_terms(terms)?;
        info!(
            terms = terms.len(),
            removed,
            "[at-02] Removed tags of deleted terms"
        );
        Ok(removed)
    }

    fn find_orphans(&self, owners: &dyn OwnerDirectory) -> LedgerResult<Vec<Orphan>> {
        let registry = self.registry();
        let mut orphans = Vec::new();

        for assignment in self.store.all()? {
            let reason = if !registry.is_registered(&assignment.owner.owner_type) {
                Some(OrphanReason::UnregisteredOwnerType)
            } else if !self.terms.term_exists(assignment.term_id)? {
                Some(OrphanReason::MissingTerm)
            } else if !owners.owner_exists(&assignment.owner)? {
                Some(OrphanReason::MissingOwner)
            } else {
                None
            };

            if let Some(reason) = reason {
                orphans.push(Orphan { assignment, reason });
            }
        }

        debug!(orphans = orphans.len(), "[at-02] Orphan scan complete");
        Ok(orphans)
    }

    fn remove_assignments(&self, assignments: &[TagAssignment]) -> LedgerResult<usize> {
        let _guard = self.writes.lock();
        let mut removed = 0;
        for assignment in assignments {
            if self.store.remove(&assignment.owner, assignment.term_id)? {
                removed += 1;
            }
        }
        info!(removed, "[at-02] Removed orphaned tag assignments");
        Ok(removed)
    }
}

impl<A: AssignmentStore, T: TermDirectory> TermUsageProbe for TagLedger<A, T> {
    fn is_any_in_use(&self, terms: &BTreeSet<TermId>) -> Result<bool, StoreError> {
        Ok(!self.store.for_terms(terms)?.is_empty())
    }
}
