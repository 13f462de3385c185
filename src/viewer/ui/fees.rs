//! Current fee and operation cost panels

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::fees::FeeStatus;
use crate::state::{Dashboard, FeeIndicator};
use crate::util::{format_asset_price, format_fee, format_usd};

fn status_color(status: FeeStatus) -> Color {
    match status {
        FeeStatus::Excellent => Color::Green,
        FeeStatus::Good => Color::LightGreen,
        FeeStatus::Moderate => Color::Yellow,
        FeeStatus::High => Color::Red,
    }
}

/// Render the fee, its status tier and the asset price
pub fn render_current_fee(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    // the indicator replaces the value while a poll is degraded
    let fee_span = match (dashboard.fee_indicator, dashboard.fee.fee) {
        (FeeIndicator::Live, Some(fee)) => Span::styled(
            format_fee(fee),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        (indicator, _) => Span::styled(indicator.label(), Style::default().fg(Color::Gray)),
    };

    let status_line = match dashboard.status {
        Some(status) => Line::from(vec![
            Span::styled("● ", Style::default().fg(status_color(status))),
            Span::styled(status.label(), Style::default().fg(status_color(status))),
        ]),
        None => Line::from(""),
    };

    let updated = dashboard
        .fee
        .last_updated
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--".to_string());

    let content = vec![
        Line::from(vec![Span::raw("Current gas: "), fee_span]),
        status_line,
        Line::from(vec![
            Span::raw("ETH price: "),
            Span::styled(
                format_asset_price(dashboard.asset_price.usd()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("   updated {updated}"),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let paragraph =
        Paragraph::new(content).block(Block::default().borders(Borders::ALL).title("Gas Price"));

    frame.render_widget(paragraph, area);
}

/// Render the per-operation USD cost table
pub fn render_costs(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Transaction Costs");

    let Some(costs) = &dashboard.costs else {
        let message = Paragraph::new("Waiting for gas price...")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(message, area);
        return;
    };

    let rows: Vec<Row> = costs
        .iter()
        .map(|cost| {
            Row::new(vec![
                Cell::from(cost.operation.label()),
                Cell::from(format!("{} gas", cost.operation.gas_units())),
                Cell::from(format_usd(cost.cost_usd)).style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45),
            Constraint::Percentage(30),
            Constraint::Percentage(25),
        ],
    )
    .header(
        Row::new(vec!["Operation", "Gas", "USD"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block);

    frame.render_widget(table, area);
}
