//! # Ports Layer
//!
//! Rule evaluation needs no driven ports: every input arrives as a
//! `TermForest` snapshot taken by the caller.

pub mod inbound;

pub use inbound::*;
