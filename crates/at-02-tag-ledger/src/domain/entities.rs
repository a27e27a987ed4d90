//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{OwnerRef, TermId};
use std::fmt;

/// One tag on one owner: the join row between an owner and a term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagAssignment {
    pub owner: OwnerRef,
    pub term_id: TermId,
    /// Position of this tag in the owner's tag list (ascending).
    pub sort: i64,
}

impl TagAssignment {
    pub fn new(owner: OwnerRef, term_id: TermId, sort: i64) -> Self {
        Self {
            owner,
            term_id,
            sort,
        }
    }
}

/// Why an assignment is an orphan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrphanReason {
    /// The referenced term no longer exists.
    MissingTerm,
    /// The owning object no longer exists.
    MissingOwner,
    /// The owner type is no longer registered as taggable.
    UnregisteredOwnerType,
}

impl fmt::Display for OrphanReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrphanReason::MissingTerm => write!(f, "missing term"),
            OrphanReason::MissingOwner => write!(f, "missing owner"),
            OrphanReason::UnregisteredOwnerType => write!(f, "unregistered owner type"),
        }
    }
}

/// An assignment eligible for removal by an explicit sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orphan {
    pub assignment: TagAssignment,
    pub reason: OrphanReason,
}
