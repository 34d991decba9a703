//! The module contains the nested sub-machine of the import dialog.
use api_types::asset::Asset;
use tracing::warn;

use crate::{context::MachineContext, error::OperationError};

/// Lifecycle of the bulk-import dialog.
///
/// `Done` is terminal for the sub-machine only: the parent observes it and
/// immediately exits the composite back to its own `Idle`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogState {
    Idle,
    Importing { seq: u64 },
    Done,
}

impl DialogState {
    /// Returns the canonical sub-state name used in displays and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "import dialog",
            Self::Importing { .. } => "importing",
            Self::Done => "import done",
        }
    }

    pub fn is_importing(&self) -> bool {
        matches!(self, Self::Importing { .. })
    }
}

/// `Idle --ImportData--> Importing`, waiting on the given invocation.
pub(crate) fn begin_import(seq: u64) -> DialogState {
    DialogState::Importing { seq }
}

/// Applies the import settlement to the open dialog.
///
/// Success appends the batch and reaches `Done`. Failure has no defined
/// transition: the dialog stays in `Importing` and closing it is the only
/// way out.
pub(crate) fn settle_import(
    seq: u64,
    batch: Result<Vec<Asset>, OperationError>,
    context: &mut MachineContext,
) -> DialogState {
    match batch {
        Ok(assets) => {
            context.store.append_all(assets);
            DialogState::Done
        }
        Err(err) => {
            warn!(error = %err, "import failed; dialog stays in importing");
            DialogState::Importing { seq }
        }
    }
}
