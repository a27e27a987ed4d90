//! # Inbound Ports (Driving Ports)

use crate::domain::{LedgerResult, Orphan, TagAssignment};
use crate::ports::outbound::OwnerDirectory;
use shared_types::{OwnerRef, TermId};
use std::collections::BTreeSet;

/// Tag assignment operations.
pub trait TagLedgerApi {
    /// The owner's tags in ascending sort order.
    fn assignments(&self, owner: &OwnerRef) -> LedgerResult<Vec<TagAssignment>>;

    /// The owner's term ids in ascending sort order.
    fn terms_of(&self, owner: &OwnerRef) -> LedgerResult<Vec<TermId>>;

    /// Append a tag after the owner's existing tags. Re-adding is a no-op.
    fn add(&self, owner: &OwnerRef, term_id: TermId) -> LedgerResult<TagAssignment>;

    /// Remove a tag. Returns `false` if the tag was not present.
    fn remove(&self, owner: &OwnerRef, term_id: TermId) -> LedgerResult<bool>;

    /// Re-sequence the owner's tags to follow `order`.
    fn reorder(&self, owner: &OwnerRef, order: &[TermId]) -> LedgerResult<()>;

    /// Append `terms` as the owner's default tags, once per owner. Returns
    /// the rows added, or `None` if the owner already received its defaults.
    fn apply_defaults(
        &self,
        owner: &OwnerRef,
        terms: &[TermId],
    ) -> LedgerResult<Option<Vec<TagAssignment>>>;

    /// Make `terms` (in order, duplicates dropped) the owner's exact tag list.
    fn replace(&self, owner: &OwnerRef, terms: &[TermId]) -> LedgerResult<Vec<TagAssignment>>;

    /// Owners tagged with `term_id`, deduplicated.
    fn tagged_owners(&self, term_id: TermId) -> LedgerResult<BTreeSet<OwnerRef>>;

    /// Owners tagged with any of `terms`, deduplicated.
    fn tagged_owners_of_any(&self, terms: &BTreeSet<TermId>) -> LedgerResult<BTreeSet<OwnerRef>>;

    /// Number of assignments referencing any of `terms`.
    fn count_for_terms(&self, terms: &BTreeSet<TermId>) -> LedgerResult<usize>;

    /// Owner deletion cascade.
    fn remove_owner(&self, owner: &OwnerRef) -> LedgerResult<usize>;

    /// Term deletion cascade.
    fn remove_for_terms(&self, terms: &BTreeSet<TermId>) -> LedgerResult<usize>;

    /// List orphaned assignments. Removes nothing.
    fn find_orphans(&self, owners: &dyn OwnerDirectory) -> LedgerResult<Vec<Orphan>>;

    /// Remove exactly the given assignments.
    fn remove_assignments(&self, assignments: &[TagAssignment]) -> LedgerResult<usize>;
}
