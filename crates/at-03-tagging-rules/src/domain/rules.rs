//! # Tagging Rules
//!
//! The two structural checks run against one candidate tag set:
//!
//! - **single-select**: at most one candidate per single-select type
//! - **required types**: every candidate's effective required types are
//!   represented among the candidates' types
//!
//! Each check is a single pass over the candidates. Neither follows
//! requirement chains, so both terminate for any requirement graph.

use crate::domain::errors::{RuleError, RuleResult};
use crate::domain::report::{RequiredTypesViolation, SingleSelectViolation};
use crate::domain::resolver::effective_required_types;
use at_01_term_hierarchy::{Term, TermForest};
use shared_types::TermId;
use std::collections::BTreeSet;

/// Look up candidate ids, dropping repeats and keeping first-seen order.
pub fn resolve_candidates<'f>(
    forest: &'f TermForest,
    candidate: &[TermId],
) -> RuleResult<Vec<&'f Term>> {
    let mut seen = BTreeSet::new();
    candidate
        .iter()
        .filter(|id| seen.insert(**id))
        .map(|id| {
            forest
                .find(*id)
                .ok_or(RuleError::TermNotFound { term_id: *id })
        })
        .collect()
}

fn present_types(tags: &[&Term]) -> BTreeSet<TermId> {
    tags.iter().map(|t| t.type_id).collect()
}

/// Single-select violations, one per offending type, in type id order.
pub fn check_single_select(
    forest: &TermForest,
    tags: &[&Term],
) -> RuleResult<Vec<SingleSelectViolation>> {
    let mut violations = Vec::new();
    for type_id in forest.single_select_types(present_types(tags)) {
        let offending: Vec<Term> = tags
            .iter()
            .filter(|t| t.type_id == type_id)
            .map(|t| (*t).clone())
            .collect();
        if offending.len() > 1 {
            violations.push(SingleSelectViolation {
                type_term: forest.get(type_id)?.clone(),
                offending,
            });
        }
    }
    Ok(violations)
}

/// Required-types violation, if any candidate's requirements are unmet.
pub fn check_required_types(
    forest: &TermForest,
    tags: &[&Term],
) -> RuleResult<Option<RequiredTypesViolation>> {
    let present = present_types(tags);
    let mut still_needed = BTreeSet::new();
    let mut offending = Vec::new();

    for tag in tags {
        let required = effective_required_types(forest, tag)?;
        let missing: Vec<TermId> = required.difference(&present).copied().collect();
        if !missing.is_empty() {
            offending.push((*tag).clone());
            still_needed.extend(missing);
        }
    }

    if offending.is_empty() {
        return Ok(None);
    }

    let still_needed = still_needed
        .into_iter()
        .filter(|id| !present.contains(id))
        .map(|id| Ok(forest.get(id)?.clone()))
        .collect::<RuleResult<Vec<Term>>>()?;

    Ok(Some(RequiredTypesViolation {
        still_needed,
        offending,
    }))
}

/// Terms that can still be added next to `current`: everything except terms
/// of single-select types already represented in `current`.
pub fn selectable_terms<'f>(forest: &'f TermForest, current: &[TermId]) -> Vec<&'f Term> {
    let present: BTreeSet<TermId> = current
        .iter()
        .filter_map(|id| forest.find(*id))
        .map(|t| t.type_id)
        .collect();
    let locked = forest.single_select_types(present);

    forest
        .iter()
        .filter(|t| !locked.contains(&t.type_id))
        .collect()
}
