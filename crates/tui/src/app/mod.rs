use chrono::{DateTime, Local};
use crossterm::event::{Event as TerminalEvent, EventStream, KeyEvent};
use futures::StreamExt;
use tokio::sync::mpsc;

use machine::{Effect, Event, Invocation, OperationOutcome, Settlement, TreeMachine};

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    ui,
    ui::keymap::AppAction,
};

/// Everything the renderer needs besides the machine itself.
#[derive(Debug)]
pub struct AppState {
    pub base_url: String,
    /// Fund identifiers offered by the strip, in display order.
    pub funds: Vec<String>,
    /// Row the table highlight sits on; clamped after every settlement.
    pub cursor: usize,
    pub last_sync: Option<DateTime<Local>>,
    pub notice: Option<String>,
}

pub struct App {
    client: Client,
    machine: TreeMachine,
    pub state: AppState,
    settlements: mpsc::UnboundedReceiver<Settlement>,
    settlements_tx: mpsc::UnboundedSender<Settlement>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let (settlements_tx, settlements) = mpsc::unbounded_channel();
        let (machine, effects) = TreeMachine::start();
        let state = AppState {
            base_url: config.base_url,
            funds: config.funds,
            cursor: 0,
            last_sync: None,
            notice: None,
        };

        let app = Self {
            client,
            machine,
            state,
            settlements,
            settlements_tx,
            should_quit: false,
        };
        app.run_effects(effects);
        Ok(app)
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let mut input = EventStream::new();

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.machine, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            tokio::select! {
                settlement = self.settlements.recv() => {
                    // The app keeps a sender of its own, so the channel
                    // never closes underneath the loop.
                    if let Some(settlement) = settlement {
                        self.apply_settlement(settlement);
                    }
                }
                event = input.next() => {
                    match event {
                        Some(Ok(TerminalEvent::Key(key))) => self.handle_key(key),
                        Some(Ok(_)) => {}
                        Some(Err(err)) => return Err(AppError::Io(err)),
                        None => self.should_quit = true,
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match ui::keymap::map_key(key) {
            AppAction::Quit => self.should_quit = true,
            AppAction::Down => self.cursor_down(),
            AppAction::Up => self.cursor_up(),
            AppAction::CycleFund => self.cycle_fund(),
            AppAction::Delete => self.dispatch(Event::DeleteAsset),
            AppAction::Add => self.dispatch(Event::AddAsset),
            AppAction::Replace => self.dispatch(Event::ReplaceAsset),
            AppAction::OpenImport => self.dispatch(Event::OpenImportDialog),
            AppAction::Confirm => {
                if self.machine.state().dialog().is_some() {
                    self.dispatch(Event::ImportData);
                }
            }
            AppAction::Cancel => {
                if self.machine.state().dialog().is_some() {
                    self.dispatch(Event::CloseImportDialog);
                } else {
                    self.dispatch(Event::UnselectAsset);
                }
            }
            AppAction::None => {}
        }
    }

    fn cursor_down(&mut self) {
        let len = self.machine.context().store.len();
        if len == 0 {
            return;
        }
        self.state.cursor = (self.state.cursor + 1).min(len - 1);
        self.select_under_cursor();
    }

    fn cursor_up(&mut self) {
        if self.machine.context().store.is_empty() {
            return;
        }
        self.state.cursor = self.state.cursor.saturating_sub(1);
        self.select_under_cursor();
    }

    fn select_under_cursor(&mut self) {
        let asset_id = self
            .machine
            .context()
            .store
            .assets()
            .get(self.state.cursor)
            .map(|asset| asset.id.clone());
        if let Some(asset_id) = asset_id {
            self.dispatch(Event::SelectAsset { asset_id });
        }
    }

    fn cycle_fund(&mut self) {
        let fund = next_fund(&self.state.funds, self.machine.context().selection.fund());
        if let Some(fund) = fund {
            self.dispatch(Event::SelectFund { fund });
        }
    }

    fn dispatch(&mut self, event: Event) {
        let effects = self.machine.handle(event);
        self.run_effects(effects);
    }

    fn apply_settlement(&mut self, settlement: Settlement) {
        self.state.notice = settlement_notice(&settlement.outcome);
        let effects = self.machine.settle(settlement);
        self.run_effects(effects);

        self.state.last_sync = Some(Local::now());
        let len = self.machine.context().store.len();
        self.state.cursor = self.state.cursor.min(len.saturating_sub(1));
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Invoke(invocation) => self.spawn_invocation(invocation),
            }
        }
    }

    /// Runs the invocation off the UI task; the settlement comes back
    /// through the channel and is applied by the event loop.
    fn spawn_invocation(&self, invocation: Invocation) {
        let client = self.client.clone();
        let settlements = self.settlements_tx.clone();
        tokio::spawn(async move {
            let settlement = client.execute(invocation).await;
            let _ = settlements.send(settlement);
        });
    }
}

/// The fund after `current` in the configured vocabulary, wrapping around;
/// the first one when nothing is selected yet.
fn next_fund(funds: &[String], current: Option<&str>) -> Option<String> {
    if funds.is_empty() {
        return None;
    }
    let next = match current.and_then(|fund| funds.iter().position(|f| f == fund)) {
        Some(index) => (index + 1) % funds.len(),
        None => 0,
    };
    funds.get(next).cloned()
}

fn settlement_notice(outcome: &OperationOutcome) -> Option<String> {
    match outcome {
        OperationOutcome::Fetched(Err(err)) => Some(format!("load failed: {}", err.0)),
        OperationOutcome::Added(Err(err)) => Some(format!("add failed: {}", err.0)),
        OperationOutcome::Replaced(Err(err)) => Some(format!("replace failed: {}", err.0)),
        OperationOutcome::Imported(Err(err)) => Some(format!("import failed: {}", err.0)),
        // A failed delete is presented exactly like a successful one.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use machine::OperationError;

    use super::*;

    fn vocabulary() -> Vec<String> {
        vec![
            "FUND – AAA".to_string(),
            "FUND – BBB".to_string(),
            "FUND – CCC".to_string(),
        ]
    }

    #[test]
    fn first_tab_picks_the_first_fund() {
        assert_eq!(
            next_fund(&vocabulary(), None),
            Some("FUND – AAA".to_string())
        );
    }

    #[test]
    fn cycling_wraps_around() {
        let funds = vocabulary();
        assert_eq!(
            next_fund(&funds, Some("FUND – AAA")),
            Some("FUND – BBB".to_string())
        );
        assert_eq!(
            next_fund(&funds, Some("FUND – CCC")),
            Some("FUND – AAA".to_string())
        );
    }

    #[test]
    fn unknown_selection_restarts_the_cycle() {
        assert_eq!(
            next_fund(&vocabulary(), Some("FUND – ZZZ")),
            Some("FUND – AAA".to_string())
        );
        assert_eq!(next_fund(&[], None), None);
    }

    #[test]
    fn failed_delete_produces_no_notice() {
        let outcome = OperationOutcome::Deleted(Err(OperationError::new("down")));
        assert_eq!(settlement_notice(&outcome), None);

        let outcome = OperationOutcome::Imported(Err(OperationError::new("down")));
        assert_eq!(
            settlement_notice(&outcome),
            Some("import failed: down".to_string())
        );
    }
}
