//! # Engine Errors

use at_01_term_hierarchy::HierarchyError;
use at_02_tag_ledger::LedgerError;
use at_03_tagging_rules::{RuleError, ValidationReport};
use thiserror::Error;

/// Errors surfaced by the engine facade.
///
/// Subsystem errors pass through unchanged. `Rejected` carries the full
/// report so callers can render or inspect the violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Rules(#[from] RuleError),

    /// An enforced tag write failed validation; nothing was written.
    #[error("Tag set rejected with {} violation(s)", .0.violation_count())]
    Rejected(Box<ValidationReport>),
}

impl EngineError {
    /// The rejected report, if this is a validation rejection.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            EngineError::Rejected(report) => Some(report),
            _ => None,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
