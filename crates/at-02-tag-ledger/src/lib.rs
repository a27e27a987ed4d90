//! # at-02-tag-ledger
//!
//! The join model between tagged objects and taxonomy terms.
//!
//! ## Overview
//!
//! - **Assignments**: one row per `(owner, term)` with a per-owner sort key
//! - **Owner registry**: taggable owner types are registered explicitly at
//!   startup instead of being discovered at runtime
//! - **Default tags**: a registered type may list default terms, appended
//!   to each of its owners exactly once
//! - **Cascades**: owner deletion and term deletion remove the matching rows
//! - **Orphan scan**: a query listing rows whose term or owner is gone; an
//!   explicit caller decides what to remove
//!
//! The ledger also serves as the term hierarchy's `TermUsageProbe`, which
//! backs the SingleSelect lock.
//!
//! ## Example
//!
//! ```rust,ignore
//! let ledger = TagLedger::new(Arc::new(InMemoryAssignmentStore::new()), term_store);
//! ledger.register_owner_type("Page", DEFAULT_RELATION);
//! ledger.add(&OwnerRef::new("Page", 1), red.id)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryAssignmentStore;
pub use domain::{
    LedgerError, LedgerResult, Orphan, OrphanReason, OwnerRegistry, TagAssignment,
    DEFAULT_RELATION,
};
pub use ports::{AssignmentStore, OwnerDirectory, TagLedgerApi, TermDirectory};
pub use service::TagLedger;
