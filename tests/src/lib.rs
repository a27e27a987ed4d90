//! # Advanced Taxonomies Test Suite
//!
//! Cross-subsystem tests run against the wired `TaxonomyEngine`.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── support.rs      # engine and tree builders
//!     ├── scenarios.rs    # end-to-end editor scenarios
//!     ├── properties.rs   # propagation, resolver, rule and ordering properties
//!     └── concurrency.rs  # parallel writers across and within trees
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p at-tests
//! cargo test -p at-tests integration::properties::
//! ```

pub mod integration;
