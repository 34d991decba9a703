use tracing::debug;

pub use api_types::AssetKind;
pub use api_types::asset::Asset;
pub use context::MachineContext;
pub use dialog::DialogState;
pub use effect::{Effect, Invocation, OperationOutcome, OperationRequest, Settlement};
pub use error::OperationError;
pub use event::{Event, EventKind};
pub use selection::SelectionState;
pub use state::TreeState;
pub use store::AssetStore;

mod context;
mod dialog;
mod effect;
mod error;
mod event;
pub mod guard;
mod selection;
mod state;
mod store;

/// The root editor machine.
///
/// Owns the context, sequences the single in-flight asynchronous operation
/// and is the single source of truth for what can happen next. One event is
/// processed at a time to completion; completions of invoked operations
/// come back through [`settle`] as internal events with the same guarantee.
///
/// [`settle`]: TreeMachine::settle
#[derive(Debug)]
pub struct TreeMachine {
    state: TreeState,
    context: MachineContext,
    next_seq: u64,
}

impl TreeMachine {
    /// Starts a machine in `LoadingInitial` with the catalog fetch already
    /// invoked.
    pub fn start() -> (Self, Vec<Effect>) {
        let machine = Self {
            state: TreeState::LoadingInitial { seq: 0 },
            context: MachineContext::default(),
            next_seq: 1,
        };
        let invocation = Invocation {
            seq: 0,
            request: OperationRequest::FetchAll,
        };
        (machine, vec![Effect::Invoke(invocation)])
    }

    pub fn state(&self) -> &TreeState {
        &self.state
    }

    /// Read-only view of the context. Mutation happens only inside
    /// transitions.
    pub fn context(&self) -> &MachineContext {
        &self.context
    }

    /// True while an asynchronous operation is in flight.
    pub fn is_synchronizing(&self) -> bool {
        self.state.is_synchronizing()
    }

    /// True iff a transition for the event kind is defined from the current
    /// state and its guard currently passes.
    pub fn can(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::SelectFund | EventKind::SelectAsset | EventKind::UnselectAsset => true,
            EventKind::DeleteAsset => self.state.is_idle() && guard::can_delete(&self.context),
            EventKind::AddAsset => self.state.is_idle() && guard::can_add(&self.context),
            EventKind::ReplaceAsset => self.state.is_idle() && guard::can_replace(&self.context),
            EventKind::OpenImportDialog => self.state.is_idle(),
            EventKind::ImportData => {
                matches!(self.state, TreeState::ImportDialog(DialogState::Idle))
            }
            EventKind::CloseImportDialog => matches!(self.state, TreeState::ImportDialog(_)),
        }
    }

    /// Processes one inbound event to completion.
    ///
    /// An event whose transition is undefined in the current state, or
    /// whose guard fails, is ignored without error.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        if !self.can(event.kind()) {
            debug!(
                state = self.state.as_str(),
                event = event.kind().as_str(),
                "event ignored"
            );
            return Vec::new();
        }

        match event {
            Event::SelectFund { fund } => {
                self.context.selection.select_fund(fund);
                Vec::new()
            }
            Event::SelectAsset { asset_id } => {
                self.context.selection.select_asset(asset_id);
                Vec::new()
            }
            Event::UnselectAsset => {
                self.context.selection.unselect_asset();
                Vec::new()
            }
            Event::DeleteAsset => self.begin_delete(),
            Event::AddAsset => self.begin_add(),
            Event::ReplaceAsset => self.begin_replace(),
            Event::OpenImportDialog => {
                self.state = TreeState::ImportDialog(DialogState::Idle);
                Vec::new()
            }
            Event::CloseImportDialog => {
                // Closing during an import abandons its result: the pending
                // settlement turns stale and is dropped on arrival.
                self.state = TreeState::Idle;
                Vec::new()
            }
            Event::ImportData => self.begin_import(),
        }
    }

    /// Applies the completion of a previously invoked operation.
    ///
    /// The settlement is applied only when its sequence number matches the
    /// invocation recorded in the current state; anything else is stale and
    /// is dropped without mutating the context.
    pub fn settle(&mut self, settlement: Settlement) -> Vec<Effect> {
        let Settlement { seq, outcome } = settlement;
        // Take the state out; every arm returns the next one.
        let state = std::mem::replace(&mut self.state, TreeState::Idle);

        self.state = match (state, outcome) {
            (TreeState::LoadingInitial { seq: expected }, OperationOutcome::Fetched(batch))
                if expected == seq =>
            {
                let assets = match batch {
                    Ok(assets) => assets,
                    Err(err) => {
                        debug!(error = %err, "initial fetch failed; starting empty");
                        Vec::new()
                    }
                };
                self.context.store.replace_all(assets);
                TreeState::Idle
            }
            (
                TreeState::DeletingAsset {
                    asset_id,
                    seq: expected,
                },
                OperationOutcome::Deleted(result),
            ) if expected == seq => {
                // Deletion is optimistic: failure takes the same path as
                // success.
                if let Err(err) = result {
                    debug!(error = %err, id = %asset_id, "delete failed; removal kept");
                }
                self.context.store.remove(&asset_id);
                self.context.selection.unselect_asset();
                TreeState::Idle
            }
            (TreeState::AddingAsset { seq: expected, .. }, OperationOutcome::Added(result))
                if expected == seq =>
            {
                match result {
                    Ok(asset) => self.context.store.append(asset),
                    Err(err) => debug!(error = %err, "add failed; catalog unchanged"),
                }
                self.context.selection.clear_fund();
                TreeState::Idle
            }
            (
                TreeState::ReplacingAsset {
                    old_asset_id,
                    seq: expected,
                    ..
                },
                OperationOutcome::Replaced(result),
            ) if expected == seq => {
                match result {
                    Ok(asset) => {
                        self.context.store.remove(&old_asset_id);
                        self.context.store.append(asset);
                    }
                    Err(err) => debug!(error = %err, "replace failed; catalog unchanged"),
                }
                self.context.selection.unselect_asset();
                self.context.selection.clear_fund();
                TreeState::Idle
            }
            (
                TreeState::ImportDialog(DialogState::Importing { seq: expected }),
                OperationOutcome::Imported(batch),
            ) if expected == seq => {
                match dialog::settle_import(expected, batch, &mut self.context) {
                    // `Done` is terminal for the sub-machine and exits the
                    // composite.
                    DialogState::Done => TreeState::Idle,
                    still => TreeState::ImportDialog(still),
                }
            }
            (state, _) => {
                debug!(seq, state = state.as_str(), "stale settlement dropped");
                state
            }
        };
        Vec::new()
    }

    fn next_invocation(&mut self, request: OperationRequest) -> Invocation {
        let seq = self.next_seq;
        self.next_seq += 1;
        Invocation { seq, request }
    }

    fn begin_delete(&mut self) -> Vec<Effect> {
        let Some(asset_id) = self.context.selection.asset_id().map(str::to_owned) else {
            // Guard passed but the input could not be built: treated as an
            // immediately failed delete.
            self.context.selection.unselect_asset();
            return Vec::new();
        };
        let invocation = self.next_invocation(OperationRequest::Delete {
            asset_id: asset_id.clone(),
        });
        self.state = TreeState::DeletingAsset {
            asset_id,
            seq: invocation.seq,
        };
        vec![Effect::Invoke(invocation)]
    }

    fn begin_add(&mut self) -> Vec<Effect> {
        let Some(fund) = self.context.selection.fund().map(str::to_owned) else {
            // Treated as an immediately failed add.
            self.context.selection.clear_fund();
            return Vec::new();
        };
        let invocation = self.next_invocation(OperationRequest::Add { fund: fund.clone() });
        self.state = TreeState::AddingAsset {
            fund,
            seq: invocation.seq,
        };
        vec![Effect::Invoke(invocation)]
    }

    fn begin_replace(&mut self) -> Vec<Effect> {
        let (Some(old_asset_id), Some(fund)) = (
            self.context.selection.asset_id().map(str::to_owned),
            self.context.selection.fund().map(str::to_owned),
        ) else {
            // Treated as an immediately failed replace.
            self.context.selection.unselect_asset();
            self.context.selection.clear_fund();
            return Vec::new();
        };
        let invocation = self.next_invocation(OperationRequest::Replace {
            old_asset_id: old_asset_id.clone(),
            fund: fund.clone(),
        });
        self.state = TreeState::ReplacingAsset {
            old_asset_id,
            fund,
            seq: invocation.seq,
        };
        vec![Effect::Invoke(invocation)]
    }

    fn begin_import(&mut self) -> Vec<Effect> {
        let invocation = self.next_invocation(OperationRequest::Import);
        self.state = TreeState::ImportDialog(dialog::begin_import(invocation.seq));
        vec![Effect::Invoke(invocation)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: &str, code: &str, kind: AssetKind) -> Asset {
        Asset {
            id: id.to_string(),
            code: code.to_string(),
            kind,
            name: format!("Asset {code}"),
            weight: "25%".to_string(),
        }
    }

    fn seeded() -> Vec<Asset> {
        vec![
            asset("1", "TR-MAIN", AssetKind::Tree),
            asset("2", "AAA", AssetKind::Fund),
            asset("3", "BBB", AssetKind::Fund),
            asset("4", "ST-01", AssetKind::Strategy),
        ]
    }

    fn pending_seq(effects: &[Effect]) -> u64 {
        match effects {
            [Effect::Invoke(invocation)] => invocation.seq,
            other => panic!("expected exactly one invocation, got {other:?}"),
        }
    }

    /// A machine brought to `Idle` with the seeded catalog.
    fn started() -> TreeMachine {
        let (mut machine, effects) = TreeMachine::start();
        let seq = pending_seq(&effects);
        machine.settle(Settlement {
            seq,
            outcome: OperationOutcome::Fetched(Ok(seeded())),
        });
        machine
    }

    #[test]
    fn start_invokes_the_catalog_fetch() {
        let (machine, effects) = TreeMachine::start();

        assert_eq!(machine.state(), &TreeState::LoadingInitial { seq: 0 });
        assert!(machine.is_synchronizing());
        match &effects[..] {
            [Effect::Invoke(invocation)] => {
                assert_eq!(invocation.request, OperationRequest::FetchAll);
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn failed_fetch_starts_with_an_empty_catalog() {
        let (mut machine, effects) = TreeMachine::start();
        let seq = pending_seq(&effects);

        machine.settle(Settlement {
            seq,
            outcome: OperationOutcome::Fetched(Err(OperationError::new("down"))),
        });

        assert!(machine.state().is_idle());
        assert!(machine.context().store.is_empty());
    }

    #[test]
    fn selection_events_are_accepted_while_synchronizing() {
        let (mut machine, _) = TreeMachine::start();

        machine.handle(Event::SelectFund {
            fund: "FUND – AAA".to_string(),
        });
        machine.handle(Event::SelectAsset {
            asset_id: "2".to_string(),
        });

        assert!(machine.is_synchronizing());
        assert_eq!(machine.context().selection.fund(), Some("FUND – AAA"));
        assert_eq!(machine.context().selection.asset_id(), Some("2"));
    }

    #[test]
    fn operations_are_ignored_while_loading() {
        let (mut machine, _) = TreeMachine::start();
        machine.handle(Event::SelectAsset {
            asset_id: "2".to_string(),
        });

        let effects = machine.handle(Event::DeleteAsset);

        assert!(effects.is_empty());
        assert!(matches!(machine.state(), TreeState::LoadingInitial { .. }));
    }

    #[test]
    fn delete_snapshot_survives_selection_changes() {
        let mut machine = started();
        machine.handle(Event::SelectAsset {
            asset_id: "2".to_string(),
        });

        let effects = machine.handle(Event::DeleteAsset);
        let seq = pending_seq(&effects);

        // The user moves the selection while the delete is in flight.
        machine.handle(Event::SelectAsset {
            asset_id: "3".to_string(),
        });

        machine.settle(Settlement {
            seq,
            outcome: OperationOutcome::Deleted(Ok(())),
        });

        assert!(machine.state().is_idle());
        assert!(!machine.context().store.contains("2"));
        assert!(machine.context().store.contains("3"));
        assert_eq!(machine.context().selection.asset_id(), None);
    }

    #[test]
    fn second_operation_is_refused_while_one_is_in_flight() {
        let mut machine = started();
        machine.handle(Event::SelectAsset {
            asset_id: "2".to_string(),
        });
        machine.handle(Event::SelectFund {
            fund: "FUND – AAA".to_string(),
        });

        let first = machine.handle(Event::DeleteAsset);
        assert_eq!(first.len(), 1);

        // Both selections are set, yet nothing may start while deleting.
        assert!(!machine.can(EventKind::AddAsset));
        assert!(machine.handle(Event::AddAsset).is_empty());
        assert!(matches!(machine.state(), TreeState::DeletingAsset { .. }));
    }

    #[test]
    fn add_failure_rolls_back_only_the_fund_selection() {
        let mut machine = started();
        machine.handle(Event::SelectFund {
            fund: "FUND – AAA".to_string(),
        });

        let effects = machine.handle(Event::AddAsset);
        let seq = pending_seq(&effects);
        machine.settle(Settlement {
            seq,
            outcome: OperationOutcome::Added(Err(OperationError::new("rejected"))),
        });

        assert!(machine.state().is_idle());
        assert_eq!(machine.context().store.len(), 4);
        assert_eq!(machine.context().selection.fund(), None);
    }

    #[test]
    fn replace_swaps_the_record_and_clears_both_selections() {
        let mut machine = started();
        machine.handle(Event::SelectAsset {
            asset_id: "3".to_string(),
        });
        machine.handle(Event::SelectFund {
            fund: "FUND – CCC".to_string(),
        });

        let effects = machine.handle(Event::ReplaceAsset);
        let seq = pending_seq(&effects);
        machine.settle(Settlement {
            seq,
            outcome: OperationOutcome::Replaced(Ok(asset("ccc", "CCC", AssetKind::Fund))),
        });

        assert!(machine.state().is_idle());
        assert_eq!(machine.context().store.len(), 4);
        assert!(!machine.context().store.contains("3"));
        assert!(machine.context().store.contains("ccc"));
        assert_eq!(machine.context().selection.asset_id(), None);
        assert_eq!(machine.context().selection.fund(), None);
    }

    #[test]
    fn replace_failure_keeps_the_catalog() {
        let mut machine = started();
        machine.handle(Event::SelectAsset {
            asset_id: "3".to_string(),
        });
        machine.handle(Event::SelectFund {
            fund: "FUND – CCC".to_string(),
        });

        let effects = machine.handle(Event::ReplaceAsset);
        let seq = pending_seq(&effects);
        machine.settle(Settlement {
            seq,
            outcome: OperationOutcome::Replaced(Err(OperationError::new("rejected"))),
        });

        assert!(machine.state().is_idle());
        assert_eq!(machine.context().store.len(), 4);
        assert!(machine.context().store.contains("3"));
        assert_eq!(machine.context().selection.asset_id(), None);
        assert_eq!(machine.context().selection.fund(), None);
    }

    #[test]
    fn import_failure_leaves_the_dialog_importing() {
        let mut machine = started();
        machine.handle(Event::OpenImportDialog);

        let effects = machine.handle(Event::ImportData);
        let seq = pending_seq(&effects);
        machine.settle(Settlement {
            seq,
            outcome: OperationOutcome::Imported(Err(OperationError::new("boom"))),
        });

        assert_eq!(
            machine.state(),
            &TreeState::ImportDialog(DialogState::Importing { seq })
        );

        // Closing is still accepted and is the only way out.
        assert!(machine.can(EventKind::CloseImportDialog));
        machine.handle(Event::CloseImportDialog);
        assert!(machine.state().is_idle());
    }

    #[test]
    fn stale_settlement_for_an_abandoned_import_is_dropped() {
        let mut machine = started();
        machine.handle(Event::OpenImportDialog);

        let effects = machine.handle(Event::ImportData);
        let seq = pending_seq(&effects);
        machine.handle(Event::CloseImportDialog);
        assert!(machine.state().is_idle());

        machine.settle(Settlement {
            seq,
            outcome: OperationOutcome::Imported(Ok(vec![asset(
                "101",
                "ST-101",
                AssetKind::Strategy,
            )])),
        });

        assert!(machine.state().is_idle());
        assert_eq!(machine.context().store.len(), 4);
        assert!(!machine.context().store.contains("101"));
    }

    #[test]
    fn mismatched_sequence_number_is_dropped() {
        let mut machine = started();
        machine.handle(Event::SelectAsset {
            asset_id: "2".to_string(),
        });
        let effects = machine.handle(Event::DeleteAsset);
        let seq = pending_seq(&effects);

        machine.settle(Settlement {
            seq: seq + 40,
            outcome: OperationOutcome::Deleted(Ok(())),
        });

        // Still waiting for the real settlement.
        assert!(matches!(machine.state(), TreeState::DeletingAsset { .. }));
        assert!(machine.context().store.contains("2"));
    }

    #[test]
    fn can_reflects_guards_and_state() {
        let mut machine = started();

        assert!(!machine.can(EventKind::DeleteAsset));
        assert!(!machine.can(EventKind::AddAsset));
        assert!(!machine.can(EventKind::ReplaceAsset));
        assert!(machine.can(EventKind::OpenImportDialog));
        assert!(!machine.can(EventKind::ImportData));
        assert!(!machine.can(EventKind::CloseImportDialog));

        machine.handle(Event::SelectAsset {
            asset_id: "2".to_string(),
        });
        assert!(machine.can(EventKind::DeleteAsset));
        assert!(!machine.can(EventKind::ReplaceAsset));

        machine.handle(Event::SelectFund {
            fund: "FUND – AAA".to_string(),
        });
        assert!(machine.can(EventKind::AddAsset));
        assert!(machine.can(EventKind::ReplaceAsset));

        machine.handle(Event::OpenImportDialog);
        assert!(machine.can(EventKind::ImportData));
        assert!(machine.can(EventKind::CloseImportDialog));
        assert!(!machine.can(EventKind::DeleteAsset));
        assert!(!machine.can(EventKind::OpenImportDialog));
    }

    #[test]
    fn open_import_dialog_is_not_synchronizing_until_import_starts() {
        let mut machine = started();
        machine.handle(Event::OpenImportDialog);

        assert!(!machine.is_synchronizing());

        machine.handle(Event::ImportData);
        assert!(machine.is_synchronizing());
    }
}
