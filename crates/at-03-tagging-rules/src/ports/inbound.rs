//! # Inbound Ports (Driving Ports)

use crate::domain::{RuleResult, ValidationMode, ValidationReport};
use at_01_term_hierarchy::{Term, TermForest};
use shared_types::TermId;
use std::collections::BTreeSet;

/// Tagging rule evaluation over a term snapshot.
pub trait TaggingRulesApi {
    /// Run both checks against one candidate tag set.
    ///
    /// ## Returns
    ///
    /// - `Ok(report)`: valid or not, with structured violation data
    /// - `Err(TermNotFound)`: a candidate id names no term
    fn validate(
        &self,
        forest: &TermForest,
        candidate: &[TermId],
        mode: ValidationMode,
    ) -> RuleResult<ValidationReport>;

    /// One-level effective required types of a term.
    fn effective_required_types(
        &self,
        forest: &TermForest,
        term_id: TermId,
    ) -> RuleResult<BTreeSet<TermId>>;

    /// Terms that can still be added next to `current`.
    fn selectable_terms<'f>(&self, forest: &'f TermForest, current: &[TermId]) -> Vec<&'f Term>;

    /// Render a report's messages in the configured style.
    fn render(&self, report: &ValidationReport) -> String;
}
