//! # Domain Errors
//!
//! Error types for the term hierarchy subsystem.
//!
//! Three families are kept apart:
//!
//! - structural input errors (`TermNotFound`, `SlugPathNotFound`, ...)
//! - integrity refusals (`SingleSelectLocked`, `ReparentUnsupported`,
//!   `DepthExceeded`)
//! - internal-consistency faults (`CycleDetected`), which a store written
//!   only through this crate can never produce

use shared_types::{StoreError, TermId};
use thiserror::Error;

/// Errors that can occur in hierarchy reads and term writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// The referenced term does not exist.
    #[error("Taxonomy term not found: {term_id}")]
    TermNotFound { term_id: TermId },

    /// The parent given for a new term does not exist.
    #[error("Parent term not found: {parent_id}")]
    ParentNotFound { parent_id: TermId },

    /// No term is reachable along the slug path.
    #[error("No taxonomy term at slug path '{path}'")]
    SlugPathNotFound { path: String },

    /// A term must have a name before it can be written.
    #[error("Taxonomy term name must not be empty")]
    EmptyName,

    /// Create was called with a term that already has an identity.
    #[error("Taxonomy term {term_id} is already saved")]
    AlreadySaved { term_id: TermId },

    /// Update was called with a term that was never saved.
    #[error("Taxonomy term '{name}' has not been saved")]
    Unsaved { name: String },

    /// Required types must be existing root terms other than the term itself.
    #[error("Term {term_id} cannot require {required_id}: required types must be other root terms")]
    InvalidRequiredType { term_id: TermId, required_id: TermId },

    /// Terms cannot be moved to another parent once created.
    #[error("Moving taxonomy term {term_id} to another parent is not supported")]
    ReparentUnsupported { term_id: TermId },

    /// SingleSelect cannot change while any term of the tree tags an object.
    #[error("SingleSelect of taxonomy {type_id} is locked: its terms are in use as tags")]
    SingleSelectLocked { type_id: TermId },

    /// A new term would sit deeper than the configured maximum.
    #[error("Taxonomy term under {parent_id} would exceed the maximum depth of {max_depth}")]
    DepthExceeded { parent_id: TermId, max_depth: usize },

    /// Parent links loop back on themselves.
    #[error("Cycle detected in taxonomy parent links at term {term_id}")]
    CycleDetected { term_id: TermId },

    /// Failure reported by the term store or usage probe.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for hierarchy operations.
pub type HierarchyResult<T> = Result<T, HierarchyError>;
