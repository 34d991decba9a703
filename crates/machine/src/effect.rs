//! The module contains the typed effects and settlements of the machine.
use api_types::asset::Asset;

use crate::error::OperationError;

/// The input of one of the five asynchronous operations.
///
/// Inputs are snapshots: the values are computed once, when the invoking
/// state is entered, and do not change even if the selections move while
/// the operation is in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationRequest {
    FetchAll,
    Delete { asset_id: String },
    Add { fund: String },
    Replace { old_asset_id: String, fund: String },
    Import,
}

impl OperationRequest {
    /// Returns the canonical operation name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchAll => "fetch-all",
            Self::Delete { .. } => "delete-one",
            Self::Add { .. } => "add-one",
            Self::Replace { .. } => "replace-one",
            Self::Import => "import-many",
        }
    }
}

/// One numbered invocation of an asynchronous operation.
///
/// The settlement echoes the sequence number back, and the machine applies
/// it only when the number matches the invocation recorded in the current
/// state. That mismatch check is what drops abandoned results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub seq: u64,
    pub request: OperationRequest,
}

/// An effect the runtime executes after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Run the operation and deliver its settlement back to the machine.
    Invoke(Invocation),
}

/// The completion of an invoked operation, delivered as an internal event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub seq: u64,
    pub outcome: OperationOutcome,
}

/// The typed output (or collapsed failure) of each operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationOutcome {
    Fetched(Result<Vec<Asset>, OperationError>),
    Deleted(Result<(), OperationError>),
    Added(Result<Asset, OperationError>),
    Replaced(Result<Asset, OperationError>),
    Imported(Result<Vec<Asset>, OperationError>),
}
