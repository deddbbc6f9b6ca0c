//! Month view
//!
//! Header with the month and its balance, the search bar and the movement
//! table, newest first.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::truncate;
use crate::models::{Money, MovementKind};
use crate::tui::app::{App, InputMode};

fn money_color(amount: Money) -> Color {
    if amount.is_negative() {
        Color::Red
    } else {
        Color::Green
    }
}

/// Render the month header
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = &app.settings.currency_symbol;
    let balance = app.balance();

    let block = Block::default()
        .title(format!(" Gastos - {} ", app.month))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let line = Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.month.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        Span::raw("   Balance: "),
        Span::styled(
            balance.format_with_symbol(symbol),
            Style::default()
                .fg(money_color(balance))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {} movements", app.ledger.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the search bar
pub fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    if app.input_mode == InputMode::Normal && !app.is_filtered() {
        let hint = Paragraph::new(" /:Search  i:Income  w:Withdrawal  d:Delete  p:PDF  e:CSV  x:Excel")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, area);
        return;
    }

    frame.render_widget(&app.search, area);
}

/// Render the movement table
pub fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = &app.settings.currency_symbol;

    let title = if app.is_filtered() {
        format!(" Movements ({} of {}) ", app.visible.len(), app.ledger.len())
    } else {
        " Movements ".to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.visible.is_empty() {
        let message = if app.is_filtered() {
            "No movements match the search."
        } else {
            "No movements this month. Press 'i' or 'w' to add one."
        };
        let text = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(16), // Date
        Constraint::Length(8),  // Kind
        Constraint::Min(20),    // Description
        Constraint::Length(14), // Amount
        Constraint::Length(16), // Category
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Fecha").style(bold),
        Cell::from("Tipo").style(bold),
        Cell::from("Descripción").style(bold),
        Cell::from("Monto").style(bold),
        Cell::from("Categoría").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = app
        .visible
        .iter()
        .map(|movement| {
            let kind_color = match movement.kind {
                MovementKind::Income => Color::Green,
                MovementKind::Withdrawal => Color::Red,
            };
            let signed = movement.signed_amount();

            Row::new(vec![
                Cell::from(movement.formatted_timestamp()),
                Cell::from(movement.kind.label()).style(Style::default().fg(kind_color)),
                Cell::from(truncate(&movement.description, 40)),
                Cell::from(format!("{:>13}", signed.format_with_symbol(symbol)))
                    .style(Style::default().fg(money_color(signed))),
                Cell::from(truncate(&movement.category, 16)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}
