use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use machine::TreeMachine;

use crate::{app::AppState, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, machine: &TreeMachine, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_fund_strip(frame, layout[0], machine, state, &theme);
    render_table(frame, layout[1], machine, state, &theme);
}

fn render_fund_strip(
    frame: &mut Frame<'_>,
    area: Rect,
    machine: &TreeMachine,
    state: &AppState,
    theme: &Theme,
) {
    let selected = machine.context().selection.fund();

    let mut line = Vec::new();
    for fund in &state.funds {
        let style = if selected == Some(fund.as_str()) {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        line.push(Span::styled(fund.clone(), style));
        line.push(Span::raw("   "));
    }
    if line.is_empty() {
        line.push(Span::styled(
            "no funds configured",
            Style::default().fg(theme.dim),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Funds");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_table(
    frame: &mut Frame<'_>,
    area: Rect,
    machine: &TreeMachine,
    state: &AppState,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Assets");

    let assets = machine.context().store.assets();
    if assets.is_empty() {
        let lines = vec![Line::from(vec![
            Span::raw("No assets. Press "),
            Span::styled("i", Style::default().fg(theme.accent)),
            Span::raw(" to import a batch, or "),
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" then "),
            Span::styled("a", Style::default().fg(theme.accent)),
            Span::raw(" to add a fund."),
        ])];
        let empty = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let selected_id = machine.context().selection.asset_id();
    let items = assets
        .iter()
        .map(|asset| {
            let marker = if selected_id == Some(asset.id.as_str()) {
                "●"
            } else {
                " "
            };
            let line = Line::from(vec![
                Span::styled(format!("{marker} "), Style::default().fg(theme.accent)),
                Span::styled(
                    format!("{:<10}", asset.code),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:<10}", asset.kind.as_str()),
                    Style::default().fg(theme.dim),
                ),
                Span::raw(format!("{:<28}", asset.name)),
                Span::styled(
                    format!("{:>7}", asset.weight),
                    Style::default().fg(theme.text),
                ),
            ]);
            ListItem::new(line)
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.cursor));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}
