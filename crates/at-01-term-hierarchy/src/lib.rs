//! # at-01-term-hierarchy
//!
//! The taxonomy term forest: terms, the hierarchy index over them, and the
//! write path that keeps every tree consistent with its root.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Term model**: roots act as *types*; every other term carries its
//!   root's `type_id`, `single_select` and `internal_only`
//! - **Hierarchy Index**: ancestors, descendants, root, depth, slug paths and
//!   breadcrumb strings over an immutable `TermForest` snapshot
//! - **Type Propagation**: eager, breadth-first push of root flags to every
//!   descendant after each write
//! - **SingleSelect lock**: a root's SingleSelect flag is frozen while any
//!   term of its tree is used as a tag
//!
//! ## Architecture
//!
//! ```text
//! TaxonomyService ──TermStore──→ (host persistence / InMemoryTermStore)
//!        │
//!        ├── TermUsageProbe ──→ Tag Ledger (at-02)
//!        ├── SlugGenerator  ──→ UrlSegmentGenerator
//!        └── Pluralizer     ──→ RulePluralizer
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use at_01_term_hierarchy::{InMemoryTermStore, NoUsage, TaxonomyApi, TaxonomyService, Term};
//!
//! let service = TaxonomyService::new(Arc::new(InMemoryTermStore::new()), Arc::new(NoUsage));
//! let colour = service.create_term(Term::new("Colour").single_select(true))?;
//! let red = service.create_term(Term::new("Red").with_parent(colour.id))?;
//! assert_eq!(red.type_id, colour.id);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryTermStore, NoUsage, RulePluralizer, UrlSegmentGenerator};
pub use domain::{
    apply_before_write, plan_propagation, HierarchyConfig, HierarchyError, HierarchyResult,
    InheritedFlags, SlugConfig, Term, TermForest, DEFAULT_MAX_DEPTH,
};
pub use ports::{Pluralizer, SlugExists, SlugGenerator, TaxonomyApi, TermStore, TermUsageProbe};
pub use service::TaxonomyService;
