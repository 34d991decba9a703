use machine::{DialogState, TreeMachine};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::ui::theme::Theme;

/// Renders the import dialog as a centered overlay while it is open.
pub fn render(frame: &mut Frame<'_>, area: Rect, machine: &TreeMachine) {
    let Some(dialog) = machine.state().dialog() else {
        return;
    };
    let theme = Theme::default();

    let width: u16 = 46.min(area.width.saturating_sub(4));
    let height: u16 = 7.min(area.height.saturating_sub(4));
    let dialog_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, dialog_area);

    let lines = match dialog {
        DialogState::Idle => vec![
            Line::from("Import the strategy batch from the server."),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(" import  "),
                Span::styled("Esc", Style::default().fg(theme.accent)),
                Span::raw(" close"),
            ]),
        ],
        DialogState::Importing { .. } => vec![
            Line::from(Span::styled(
                "Importing…",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Esc", Style::default().fg(theme.accent)),
                Span::raw(" close and abandon the result"),
            ]),
        ],
        // Done exits to the parent on the same transition, so it is never
        // on screen; rendered for completeness.
        DialogState::Done => vec![Line::from("Import complete.")],
    };

    let block = Block::default()
        .title(" Import ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(lines).block(block), dialog_area);
}
