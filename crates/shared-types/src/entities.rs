//! # Core Identity Types
//!
//! - **Terms**: `TermId`, with `TermId::UNSAVED` marking a term that has not
//!   been persisted yet.
//! - **Owners**: `OwnerType` and `OwnerRef`, the polymorphic reference to a
//!   tagged entity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a taxonomy term.
///
/// Identifiers are assigned by the term store on insert. The zero value is
/// reserved for terms that have not been saved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct TermId(pub u64);

impl TermId {
    /// Identifier carried by a term that has not been persisted.
    pub const UNSAVED: TermId = TermId(0);

    /// Whether this identifier refers to a persisted term.
    pub fn is_saved(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for TermId {
    fn from(value: u64) -> Self {
        TermId(value)
    }
}

/// Name of a taggable entity type, e.g. `"Page"` or `"File"`.
///
/// Owner types must be registered with the tag ledger before objects of that
/// type can be tagged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerType(String);

impl OwnerType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Polymorphic reference to a tagged object: `(owner type, owner id)`.
///
/// Equality and ordering are by both components, so the same numeric id under
/// two owner types names two different objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerRef {
    pub owner_type: OwnerType,
    pub owner_id: u64,
}

impl OwnerRef {
    pub fn new(owner_type: impl Into<OwnerType>, owner_id: u64) -> Self {
        Self {
            owner_type: owner_type.into(),
            owner_id,
        }
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.owner_type, self.owner_id)
    }
}
