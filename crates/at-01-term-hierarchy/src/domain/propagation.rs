//! # Type Propagation
//!
//! Keeps `type_id`, `single_select` and `internal_only` of every node equal
//! to its root's values.
//!
//! - Before a write, a node copies the flags of its parent (or, for a saved
//!   root, points `type_id` at itself).
//! - After a write, `plan_propagation` walks the subtree below the written
//!   node with an explicit queue and lists every descendant whose inherited
//!   flags differ. The caller persists that list in order.

use crate::domain::entities::Term;
use crate::domain::errors::{HierarchyError, HierarchyResult};
use crate::domain::forest::TermForest;
use std::collections::{HashSet, VecDeque};

/// Derive the inherited flags of `term` ahead of persisting it.
pub fn apply_before_write(term: &mut Term, parent: Option<&Term>) {
    match parent {
        Some(parent) => parent.inherited_flags().apply_to(term),
        None if term.is_saved() => term.type_id = term.id,
        None => {}
    }
}

/// Descendants of `written` that must be rewritten, breadth-first.
///
/// Every descendant is visited exactly once; those already carrying the
/// written node's flags are left out so re-running is a no-op.
pub fn plan_propagation(forest: &TermForest, written: &Term) -> HierarchyResult<Vec<Term>> {
    let flags = written.inherited_flags();
    let mut visited = HashSet::from([written.id]);
    let mut queue = VecDeque::from([written.id]);
    let mut planned = Vec::new();

    while let Some(current) = queue.pop_front() {
        for child in forest.children(current) {
            if !visited.insert(child.id) {
                return Err(HierarchyError::CycleDetected { term_id: child.id });
            }
            queue.push_back(child.id);

            if child.inherited_flags() != flags {
                let mut updated = child.clone();
                flags.apply_to(&mut updated);
                planned.push(updated);
            }
        }
    }

    Ok(planned)
}
