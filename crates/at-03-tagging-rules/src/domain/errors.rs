//! # Domain Errors
//!
//! A failed validation is not an error: it is a `ValidationReport` with
//! violations. These variants cover malformed input and inconsistent
//! hierarchy data only.

use at_01_term_hierarchy::HierarchyError;
use shared_types::TermId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A candidate tag does not name an existing term.
    #[error("Candidate tag {term_id} is not a known taxonomy term")]
    TermNotFound { term_id: TermId },

    /// The hierarchy snapshot could not answer a lookup.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

pub type RuleResult<T> = Result<T, RuleError>;
