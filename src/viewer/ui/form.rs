//! Alert registration form

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::alerts::{AlertForm, FormField, SubmissionStatus};

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if focused { "▏" } else { "" };

    Line::from(vec![
        Span::styled(label, style),
        Span::raw(value),
        Span::styled(cursor, Style::default().fg(Color::Yellow)),
    ])
}

pub fn render(frame: &mut Frame, area: Rect, form: &AlertForm, bot_username: &str) {
    let mut content = vec![
        field_line(
            "Max gas price (Gwei): ",
            &form.max_gas_price,
            form.focus == FormField::MaxGasPrice,
        ),
        field_line(
            "Telegram username:    ",
            &form.telegram_username,
            form.focus == FormField::TelegramUsername,
        ),
        Line::from(""),
        Line::from(vec![
            Span::raw("Then send /start to "),
            Span::styled(format!("@{bot_username}"), Style::default().fg(Color::Cyan)),
        ]),
    ];

    if let Some(text) = form.status.text() {
        let color = match form.status {
            SubmissionStatus::Success(_) => Color::Green,
            SubmissionStatus::Error(_) => Color::Red,
            _ => Color::Gray,
        };
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(text, Style::default().fg(color))));
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Create Alert"));

    frame.render_widget(paragraph, area);
}
