use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Up,
    Down,
    CycleFund,
    Delete,
    Add,
    Replace,
    OpenImport,
    Confirm,
    Cancel,
    None,
}

pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return AppAction::Quit;
        }
        return AppAction::None;
    }

    match key.code {
        KeyCode::Char('q') => AppAction::Quit,
        KeyCode::Char('k') | KeyCode::Up => AppAction::Up,
        KeyCode::Char('j') | KeyCode::Down => AppAction::Down,
        KeyCode::Tab => AppAction::CycleFund,
        KeyCode::Char('d') => AppAction::Delete,
        KeyCode::Char('a') => AppAction::Add,
        KeyCode::Char('r') => AppAction::Replace,
        KeyCode::Char('i') => AppAction::OpenImport,
        KeyCode::Enter => AppAction::Confirm,
        KeyCode::Esc => AppAction::Cancel,
        _ => AppAction::None,
    }
}
