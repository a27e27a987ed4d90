//! # Domain Layer
//!
//! Pure domain logic for the term hierarchy subsystem.
//!
//! - `entities`: the `Term` node and its inherited flags
//! - `forest`: the hierarchy index over an immutable snapshot of terms
//! - `propagation`: before-write derivation and the after-write tree walk
//!
//! This module contains NO I/O dependencies. All external interactions
//! are abstracted through ports in the `ports` module.

pub mod entities;
pub mod errors;
pub mod forest;
pub mod propagation;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use forest::*;
pub use propagation::*;
pub use value_objects::*;
