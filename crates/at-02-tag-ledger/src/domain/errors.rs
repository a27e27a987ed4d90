//! # Domain Errors

use shared_types::{OwnerRef, OwnerType, StoreError, TermId};
use thiserror::Error;

/// Errors raised by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Objects of this type were never registered as taggable.
    #[error("Owner type '{owner_type}' is not registered as taggable")]
    UnregisteredOwnerType { owner_type: OwnerType },

    /// The term being assigned does not exist.
    #[error("Cannot tag with unknown taxonomy term {term_id}")]
    TermNotFound { term_id: TermId },

    /// A reorder list must name each of the owner's tags exactly once.
    #[error("Reorder of {owner} must list each of its {expected} tags exactly once")]
    ReorderMismatch { owner: OwnerRef, expected: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
