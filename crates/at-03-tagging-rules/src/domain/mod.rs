//! # Domain Layer
//!
//! Pure rule evaluation over a `TermForest` snapshot.
//!
//! - `resolver`: one-level effective required types
//! - `rules`: the single-select and required-types checks
//! - `report`: structured violation data

pub mod errors;
pub mod report;
pub mod resolver;
pub mod rules;
pub mod value_objects;

pub use errors::*;
pub use report::*;
pub use resolver::*;
pub use rules::*;
pub use value_objects::*;
