//! # Adapters Layer
//!
//! Default implementations of the outbound ports.
//!
//! - `memory_store`: `TermStore` over an in-memory map
//! - `slug`: URL segment generation
//! - `plural`: rule-table English pluralizer
//! - `NoUsage`: a usage probe for hosts without a tag ledger

pub mod memory_store;
pub mod plural;
pub mod slug;

pub use memory_store::InMemoryTermStore;
pub use plural::RulePluralizer;
pub use slug::UrlSegmentGenerator;

use crate::ports::TermUsageProbe;
use shared_types::{StoreError, TermId};
use std::collections::BTreeSet;

/// Usage probe that never reports a term in use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUsage;

impl TermUsageProbe for NoUsage {
    fn is_any_in_use(&self, _terms: &BTreeSet<TermId>) -> Result<bool, StoreError> {
        Ok(false)
    }
}
