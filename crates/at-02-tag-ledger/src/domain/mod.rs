//! # Domain Layer
//!
//! Tag assignments, the owner-type registry and orphan classification.

pub mod entities;
pub mod errors;
pub mod registry;

pub use entities::*;
pub use errors::*;
pub use registry::*;
