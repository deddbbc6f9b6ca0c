//! Status bar view
//!
//! Shows the month totals, the last status message and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::{Money, MovementKind};
use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = &app.settings.currency_symbol;

    let (income, withdrawals) = app.ledger.movements.iter().fold(
        (Money::zero(), Money::zero()),
        |(income, withdrawals), m| match m.kind {
            MovementKind::Income => (income + m.amount, withdrawals),
            MovementKind::Withdrawal => (income, withdrawals + m.amount),
        },
    );

    let mut spans = vec![
        Span::styled(" In: ", Style::default().fg(Color::White)),
        Span::styled(income.format_with_symbol(symbol), Style::default().fg(Color::Green)),
        Span::raw(" │ "),
        Span::styled("Out: ", Style::default().fg(Color::White)),
        Span::styled(
            withdrawals.format_with_symbol(symbol),
            Style::default().fg(Color::Red),
        ),
    ];

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(message.as_str(), Style::default().fg(Color::Yellow)));
    }

    let hints = " ←/→:Month  q:Quit  ?:Help ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
