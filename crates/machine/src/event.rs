//! The module contains the inbound events of the editor machine.

/// An inbound event from the presentation collaborator.
///
/// Selection events are accepted in every state; the rest only where the
/// transition table defines them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    SelectFund { fund: String },
    SelectAsset { asset_id: String },
    UnselectAsset,
    DeleteAsset,
    AddAsset,
    ReplaceAsset,
    OpenImportDialog,
    CloseImportDialog,
    ImportData,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::SelectFund { .. } => EventKind::SelectFund,
            Self::SelectAsset { .. } => EventKind::SelectAsset,
            Self::UnselectAsset => EventKind::UnselectAsset,
            Self::DeleteAsset => EventKind::DeleteAsset,
            Self::AddAsset => EventKind::AddAsset,
            Self::ReplaceAsset => EventKind::ReplaceAsset,
            Self::OpenImportDialog => EventKind::OpenImportDialog,
            Self::CloseImportDialog => EventKind::CloseImportDialog,
            Self::ImportData => EventKind::ImportData,
        }
    }
}

/// The discriminant of [`Event`], used for permissibility queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    SelectFund,
    SelectAsset,
    UnselectAsset,
    DeleteAsset,
    AddAsset,
    ReplaceAsset,
    OpenImportDialog,
    CloseImportDialog,
    ImportData,
}

impl EventKind {
    /// Returns the canonical event name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelectFund => "select_fund",
            Self::SelectAsset => "select_asset",
            Self::UnselectAsset => "unselect_asset",
            Self::DeleteAsset => "delete_asset",
            Self::AddAsset => "add_asset",
            Self::ReplaceAsset => "replace_asset",
            Self::OpenImportDialog => "open_import_dialog",
            Self::CloseImportDialog => "close_import_dialog",
            Self::ImportData => "import_data",
        }
    }
}
