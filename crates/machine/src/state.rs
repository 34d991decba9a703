//! The module contains the root states of the editor machine.
use crate::dialog::DialogState;

/// Root states of the editor machine.
///
/// The invoking states record the input snapshot taken when the state was
/// entered together with the sequence number of the invocation they wait
/// for. Selection changes while waiting never alter the snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeState {
    /// Initial state, the catalog fetch is in flight.
    LoadingInitial { seq: u64 },
    Idle,
    DeletingAsset { asset_id: String, seq: u64 },
    AddingAsset { fund: String, seq: u64 },
    ReplacingAsset { old_asset_id: String, fund: String, seq: u64 },
    /// The import dialog is open; the sub-machine tracks its lifecycle.
    ImportDialog(DialogState),
}

impl TreeState {
    /// Returns the canonical state name used in displays and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoadingInitial { .. } => "loading",
            Self::Idle => "idle",
            Self::DeletingAsset { .. } => "deleting",
            Self::AddingAsset { .. } => "adding",
            Self::ReplacingAsset { .. } => "replacing",
            Self::ImportDialog(dialog) => dialog.as_str(),
        }
    }

    /// True while an asynchronous operation is in flight.
    pub fn is_synchronizing(&self) -> bool {
        match self {
            Self::LoadingInitial { .. }
            | Self::DeletingAsset { .. }
            | Self::AddingAsset { .. }
            | Self::ReplacingAsset { .. } => true,
            Self::ImportDialog(dialog) => dialog.is_importing(),
            Self::Idle => false,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The import dialog sub-state, when the dialog is open.
    pub fn dialog(&self) -> Option<&DialogState> {
        match self {
            Self::ImportDialog(dialog) => Some(dialog),
            _ => None,
        }
    }
}
