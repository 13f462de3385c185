//! Usage statistics panel

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::Dashboard;

pub fn render(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let stats = &dashboard.stats;
    let value = Style::default().fg(Color::Cyan);

    let content = vec![
        Line::from(vec![
            Span::raw("Active users:     "),
            Span::styled(stats.active_users.to_string(), value),
        ]),
        Line::from(vec![
            Span::raw("Alerts (24h):     "),
            Span::styled(stats.total_alerts24h.to_string(), value),
        ]),
        Line::from(vec![
            Span::raw("Delivered (24h):  "),
            Span::styled(stats.successful_alerts24h.to_string(), value),
        ]),
        Line::from(vec![
            Span::raw("Success rate:     "),
            Span::styled(format!("{}%", stats.success_rate()), value),
        ]),
    ];

    let paragraph =
        Paragraph::new(content).block(Block::default().borders(Borders::ALL).title("Statistics"));

    frame.render_widget(paragraph, area);
}
