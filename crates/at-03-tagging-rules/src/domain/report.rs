//! # Validation Report
//!
//! Structured violation data. Rendering it into sentences is the job of the
//! `messages` module or of a presentation layer.

use at_01_term_hierarchy::Term;
use serde::{Deserialize, Serialize};
use shared_types::TermId;

use crate::domain::value_objects::ValidationMode;

/// Two or more candidate tags share a single-select type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleSelectViolation {
    /// Root term of the single-select tree.
    pub type_term: Term,
    /// The candidate tags of that type, in candidate order (at least two).
    pub offending: Vec<Term>,
}

/// Some candidate tags require types no candidate tag belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredTypesViolation {
    /// Root terms that still need a tag, in id order.
    pub still_needed: Vec<Term>,
    /// Candidate tags whose requirements are unmet, in candidate order.
    pub offending: Vec<Term>,
}

/// Outcome of validating one candidate tag set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub mode: ValidationMode,
    /// The validated tags after duplicates were collapsed.
    pub candidate: Vec<TermId>,
    pub single_select: Vec<SingleSelectViolation>,
    pub required_types: Option<RequiredTypesViolation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.single_select.is_empty() && self.required_types.is_none()
    }

    /// Number of distinct violations (one per single-select type, one for
    /// required types).
    pub fn violation_count(&self) -> usize {
        self.single_select.len() + usize::from(self.required_types.is_some())
    }
}
