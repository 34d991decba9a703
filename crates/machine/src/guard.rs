//! The module contains the guard predicates of the editor machine.
//!
//! Guards are pure functions over a read-only context view, evaluated only
//! at the moment the triggering event is processed. A failed guard ignores
//! the event without surfacing an error.
use crate::context::MachineContext;

/// Deleting requires a selected asset.
pub fn can_delete(context: &MachineContext) -> bool {
    context.selection.asset_id().is_some()
}

/// Adding requires a selected fund.
pub fn can_add(context: &MachineContext) -> bool {
    context.selection.fund().is_some()
}

/// Replacing requires both selections.
pub fn can_replace(context: &MachineContext) -> bool {
    can_delete(context) && can_add(context)
}
