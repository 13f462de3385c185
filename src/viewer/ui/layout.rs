//! Main dashboard layout

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::alerts::AlertForm;
use crate::state::Dashboard;

use super::{fees, form, stats};

/// Everything a frame needs, borrowed from the app
pub struct ViewState<'a> {
    pub dashboard: &'a Dashboard,
    pub form: &'a AlertForm,
    pub bot_username: &'a str,
    pub api_url: &'a str,
}

/// Render the main dashboard UI
pub fn render(frame: &mut Frame, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation summary
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], view);
    render_content(frame, chunks[1], view);
    render_footer(frame, chunks[2], view);
}

/// Persistent navigation summary with the headline counters
fn render_header(frame: &mut Frame, area: Rect, view: &ViewState) {
    let stats = &view.dashboard.stats;

    let line = Line::from(vec![
        Span::styled(
            "⛽ Gas Tracker",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Active users: "),
        Span::styled(
            stats.active_users.to_string(),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | Alerts (24h): "),
        Span::styled(
            stats.total_alerts24h.to_string(),
            Style::default().fg(Color::Cyan),
        ),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_content(frame: &mut Frame, area: Rect, view: &ViewState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Current fee
            Constraint::Min(8),    // Cost table
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Stats
            Constraint::Min(9),    // Alert form
        ])
        .split(columns[1]);

    fees::render_current_fee(frame, left[0], view.dashboard);
    fees::render_costs(frame, left[1], view.dashboard);
    stats::render(frame, right[0], view.dashboard);
    form::render(frame, right[1], view.form, view.bot_username);
}

/// Render footer with backend and keybindings
fn render_footer(frame: &mut Frame, area: Rect, view: &ViewState) {
    let footer_text = vec![
        Span::raw("Field: "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" | Submit: "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" | Refresh: "),
        Span::styled("F5", Style::default().fg(Color::Yellow)),
        Span::raw(" | Quit: "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        Span::styled(view.api_url, Style::default().fg(Color::DarkGray)),
    ];

    let footer =
        Paragraph::new(Line::from(footer_text)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
