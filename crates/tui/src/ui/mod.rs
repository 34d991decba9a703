pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use machine::{EventKind, TreeMachine};

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, machine: &TreeMachine, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Main layout: info bar, fund strip + asset table, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], machine, state, &theme);
    screens::assets::render(frame, layout[1], machine, state);
    render_bottom_bar(frame, layout[2], machine, &theme);

    // The import dialog draws last, centered over everything else.
    components::dialog::render(frame, area, machine);
}

fn render_info_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    machine: &TreeMachine,
    state: &AppState,
    theme: &Theme,
) {
    let sync = state
        .last_sync
        .map(|at| at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut line = vec![
        Span::styled("Server", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("State", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", machine.state().as_str())),
        Span::styled("Sync", Style::default().fg(theme.dim)),
        Span::raw(format!(": {sync}  ")),
    ];
    if machine.is_synchronizing() {
        line.push(Span::styled(
            "SYNCHRONIZING",
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(notice) = state.notice.as_ref() {
        line.push(Span::raw("  "));
        line.push(Span::styled(
            notice.as_str(),
            Style::default().fg(theme.error),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, machine: &TreeMachine, theme: &Theme) {
    let mut parts = vec![
        Span::styled("j/k", Style::default().fg(theme.accent)),
        Span::raw(" move  "),
        Span::styled("Tab", Style::default().fg(theme.accent)),
        Span::raw(" fund  "),
    ];

    parts.extend(hint(
        "d",
        "delete",
        machine.can(EventKind::DeleteAsset),
        theme,
    ));
    parts.extend(hint("a", "add", machine.can(EventKind::AddAsset), theme));
    parts.extend(hint(
        "r",
        "replace",
        machine.can(EventKind::ReplaceAsset),
        theme,
    ));
    parts.extend(hint(
        "i",
        "import",
        machine.can(EventKind::OpenImportDialog),
        theme,
    ));
    if machine.can(EventKind::ImportData) {
        parts.extend(hint("Enter", "start import", true, theme));
    }
    if machine.can(EventKind::CloseImportDialog) {
        parts.extend(hint("Esc", "close", true, theme));
    } else {
        parts.extend(hint(
            "Esc",
            "unselect",
            machine.can(EventKind::UnselectAsset),
            theme,
        ));
    }

    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// A key hint, dimmed out while the action is unavailable.
fn hint(
    key: &'static str,
    label: &'static str,
    enabled: bool,
    theme: &Theme,
) -> [Span<'static>; 2] {
    let (key_style, label_style) = if enabled {
        (
            Style::default().fg(theme.accent),
            Style::default().fg(theme.text),
        )
    } else {
        (
            Style::default().fg(theme.dim),
            Style::default().fg(theme.dim),
        )
    };
    [
        Span::styled(key, key_style),
        Span::styled(format!(" {label}  "), label_style),
    ]
}
