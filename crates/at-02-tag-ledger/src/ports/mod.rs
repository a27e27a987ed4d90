//! # Ports Layer
//!
//! - **Inbound (Driving)**: `TagLedgerApi`
//! - **Outbound (Driven)**: assignment store, term and owner directories

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
