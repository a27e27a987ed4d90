//! # Shared Types Crate
//!
//! Identifiers and value types used by every taxonomy subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `TermId` and `OwnerRef` are defined once and
//!   re-used by the hierarchy, ledger and rules crates.
//! - **Opaque Owners**: a tagged object is known only by its registered owner
//!   type and numeric id. Resolving it to a concrete record is the host's job.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
