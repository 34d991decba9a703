//! The module contains the mutable context owned by the machine.
use crate::{selection::SelectionState, store::AssetStore};

/// The only mutable state the machine owns.
///
/// Created empty at machine start and mutated exclusively by transition
/// actions. Collaborators read it through the machine's `context` view and
/// the derived queries; nothing outside the machine writes to it.
#[derive(Clone, Debug, Default)]
pub struct MachineContext {
    pub store: AssetStore,
    pub selection: SelectionState,
}
