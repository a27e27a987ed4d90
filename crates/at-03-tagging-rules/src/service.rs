//! Tagging rule validator.

use crate::domain::{
    check_required_types, check_single_select, resolve_candidates, RuleResult, RulesConfig,
    ValidationMode, ValidationReport,
};
use crate::messages::render_report;
use crate::ports::inbound::TaggingRulesApi;
use at_01_term_hierarchy::{Term, TermForest};
use shared_types::TermId;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Validates candidate tag sets against the single-select and required-types
/// rules.
#[derive(Debug, Clone, Default)]
pub struct TaggingRuleValidator {
    config: RulesConfig,
}

impl TaggingRuleValidator {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }
}

impl TaggingRulesApi for TaggingRuleValidator {
    fn validate(
        &self,
        forest: &TermForest,
        candidate: &[TermId],
        mode: ValidationMode,
    ) -> RuleResult<ValidationReport> {
        let tags = resolve_candidates(forest, candidate)?;
        let report = ValidationReport {
            mode,
            candidate: tags.iter().map(|t| t.id).collect(),
            single_select: check_single_select(forest, &tags)?,
            required_types: check_required_types(forest, &tags)?,
        };

        match (report.is_valid(), mode) {
            (true, _) => debug!(tags = tags.len(), "[at-03] Tag set valid"),
            (false, ValidationMode::Enforce) => warn!(
                tags = tags.len(),
                violations = report.violation_count(),
                "[at-03] Tag set rejected"
            ),
            (false, ValidationMode::Advisory) => debug!(
                tags = tags.len(),
                violations = report.violation_count(),
                "[at-03] Tag set has advisory violations"
            ),
        }
        Ok(report)
    }

    fn effective_required_types(
        &self,
        forest: &TermForest,
        term_id: TermId,
    ) -> RuleResult<BTreeSet<TermId>> {
        crate::domain::effective_required_types(forest, forest.get(term_id)?)
    }

    fn selectable_terms<'f>(&self, forest: &'f TermForest, current: &[TermId]) -> Vec<&'f Term> {
        crate::domain::selectable_terms(forest, current)
    }

    fn render(&self, report: &ValidationReport) -> String {
        render_report(report, self.config.message_style)
    }
}
