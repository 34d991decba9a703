//! The module contains the single failure the machine models.
use thiserror::Error;

/// The only failure kind visible at the machine boundary.
///
/// Transport, status and validation failures of the backend are collapsed
/// into this value before a settlement reaches the machine. No distinction
/// between transient and permanent failures survives the collapse.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("operation failed: {0}")]
pub struct OperationError(pub String);

impl OperationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}
