//! Manual movement entry dialog
//!
//! Modal form for adding an income or a withdrawal to the viewed month,
//! with tab navigation and inline validation messages.

use chrono::{Local, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{format_timestamp, parse_timestamp, Money, MovementKind};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

/// Which field is currently focused in the movement form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementField {
    #[default]
    Amount,
    Description,
    Category,
    Date,
}

impl MovementField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Amount => Self::Description,
            Self::Description => Self::Category,
            Self::Category => Self::Date,
            Self::Date => Self::Amount,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Amount => Self::Date,
            Self::Description => Self::Amount,
            Self::Category => Self::Description,
            Self::Date => Self::Category,
        }
    }
}

/// State for the movement form dialog
#[derive(Debug, Clone)]
pub struct MovementFormState {
    /// Income or withdrawal
    pub kind: MovementKind,

    /// Currently focused field
    pub focused_field: MovementField,

    pub amount: TextInput,
    pub description: TextInput,
    pub category: TextInput,

    /// Timestamp input, prefilled with the current minute
    pub date: TextInput,

    /// Error message to display
    pub error_message: Option<String>,
}

impl MovementFormState {
    /// Create an empty form for the given kind
    pub fn new(kind: MovementKind) -> Self {
        let now = format_timestamp(Local::now().naive_local());
        let mut form = Self {
            kind,
            focused_field: MovementField::Amount,
            amount: TextInput::new().label("Amount").placeholder("0,00"),
            description: TextInput::new()
                .label("Description")
                .placeholder("What was it?"),
            category: TextInput::new()
                .label("Category")
                .placeholder("General"),
            date: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD HH:MM")
                .content(now),
            error_message: None,
        };
        form.update_focus();
        form
    }

    /// Move focus to next field
    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.update_focus();
    }

    /// Move focus to previous field
    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.amount.focused = self.focused_field == MovementField::Amount;
        self.description.focused = self.focused_field == MovementField::Description;
        self.category.focused = self.focused_field == MovementField::Category;
        self.date.focused = self.focused_field == MovementField::Date;
    }

    /// Get the currently focused input
    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            MovementField::Amount => &mut self.amount,
            MovementField::Description => &mut self.description,
            MovementField::Category => &mut self.category,
            MovementField::Date => &mut self.date,
        }
    }

    /// Parse the amount and date fields
    ///
    /// An empty date means now.
    pub fn parse(&self) -> Result<(Money, NaiveDateTime), String> {
        let amount_text = self.amount.value().trim();
        if amount_text.is_empty() {
            return Err("Amount is required".to_string());
        }
        let amount = Money::parse(amount_text).map_err(|e| e.to_string())?;

        let date_text = self.date.value().trim();
        let timestamp = if date_text.is_empty() {
            Local::now().naive_local()
        } else {
            parse_timestamp(date_text).map_err(|e| e.to_string())?
        };

        Ok((amount, timestamp))
    }

    /// Clear any error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the movement dialog
pub fn render(frame: &mut Frame, app: &App) {
    let form = &app.movement_form;
    let area = centered_rect_fixed(64, 12, frame.area());

    frame.render_widget(Clear, area);

    let (title, color) = match form.kind {
        MovementKind::Income => (format!(" Add Income ({}) ", app.month), Color::Green),
        MovementKind::Withdrawal => (format!(" Add Withdrawal ({}) ", app.month), Color::Red),
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Description
            Constraint::Length(1), // Category
            Constraint::Length(1), // Date
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(&form.amount, chunks[0]);
    frame.render_widget(&form.description, chunks[1]);
    frame.render_widget(&form.category, chunks[2]);
    frame.render_widget(&form.date, chunks[3]);

    if let Some(ref error) = form.error_message {
        let error_line = Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)));
        frame.render_widget(Paragraph::new(error_line), chunks[5]);
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[Shift+Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Prev  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[7]);
}

/// Handle key input for the movement dialog
/// Returns true if the key was handled, false otherwise
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let form = &mut app.movement_form;

    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => form.prev_field(),
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Enter => app.save_movement_form(),
        KeyCode::Backspace => {
            form.clear_error();
            form.focused_input().backspace();
        }
        KeyCode::Delete => {
            form.clear_error();
            form.focused_input().delete();
        }
        KeyCode::Left => form.focused_input().move_left(),
        KeyCode::Right => form.focused_input().move_right(),
        KeyCode::Home => form.focused_input().move_start(),
        KeyCode::End => form.focused_input().move_end(),
        KeyCode::Char(c) => {
            form.clear_error();
            form.focused_input().insert(c);
        }
        _ => return false,
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInput {
        TextInput::new().content(text)
    }

    #[test]
    fn test_field_cycle() {
        let mut form = MovementFormState::new(MovementKind::Income);
        assert!(form.amount.focused);
        form.next_field();
        form.next_field();
        form.next_field();
        assert_eq!(form.focused_field, MovementField::Date);
        assert!(form.date.focused && !form.amount.focused);
        form.next_field();
        assert_eq!(form.focused_field, MovementField::Amount);
        form.prev_field();
        assert_eq!(form.focused_field, MovementField::Date);
    }

    #[test]
    fn test_parse_amount_and_date() {
        let mut form = MovementFormState::new(MovementKind::Withdrawal);
        form.amount = typed("1.234,50");
        form.date = typed("2024-03-15 09:30");

        let (amount, timestamp) = form.parse().unwrap();
        assert_eq!(amount, Money::from_cents(123_450));
        assert_eq!(format_timestamp(timestamp), "2024-03-15 09:30");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        let mut form = MovementFormState::new(MovementKind::Income);
        assert_eq!(form.parse().unwrap_err(), "Amount is required");

        form.amount = typed("doce");
        assert!(form.parse().is_err());

        form.amount = typed("12");
        form.date = typed("15/03/2024");
        assert!(form.parse().unwrap_err().contains("YYYY-MM-DD HH:MM"));
    }

    #[test]
    fn test_empty_date_means_now() {
        let mut form = MovementFormState::new(MovementKind::Income);
        form.amount = typed("5");
        form.date = typed("");
        assert!(form.parse().is_ok());
    }
}
