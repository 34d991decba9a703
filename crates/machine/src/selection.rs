//! The module contains the selection axes of the editor.

/// The two independent selection axes.
///
/// `asset_id` points at a record present in the catalog at selection time
/// and is cleared whenever the referenced asset is removed or replaced.
/// `fund` is a free-standing identifier from the configured vocabulary and
/// is never validated against the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    fund: Option<String>,
    asset_id: Option<String>,
}

impl SelectionState {
    pub fn select_fund(&mut self, fund: String) {
        self.fund = Some(fund);
    }

    pub fn clear_fund(&mut self) {
        self.fund = None;
    }

    pub fn select_asset(&mut self, asset_id: String) {
        self.asset_id = Some(asset_id);
    }

    pub fn unselect_asset(&mut self) {
        self.asset_id = None;
    }

    pub fn fund(&self) -> Option<&str> {
        self.fund.as_deref()
    }

    pub fn asset_id(&self) -> Option<&str> {
        self.asset_id.as_deref()
    }
}
