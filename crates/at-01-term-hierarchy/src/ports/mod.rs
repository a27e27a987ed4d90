//! # Ports Layer
//!
//! Hexagonal architecture ports for the term hierarchy subsystem.
//!
//! - **Inbound (Driving)**: `TaxonomyApi`, the term lifecycle API
//! - **Outbound (Driven)**: term store, usage probe, slug and plural generators

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
