//! # Error Types
//!
//! Store errors shared by every outbound storage port.

use thiserror::Error;

/// Errors raised by a term or assignment store adapter.
///
/// Subsystems wrap this type unchanged so that I/O failures reach the caller
/// as they were reported by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The record addressed by the operation does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The store rejected the write because of a constraint.
    #[error("Constraint violated: {0}")]
    Constraint(String),

    /// Backend failure (I/O, connection, serialization).
    #[error("Backend error: {0}")]
    Backend(String),
}
