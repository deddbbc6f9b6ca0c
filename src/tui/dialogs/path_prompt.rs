//! File path prompt
//!
//! Single-line dialog asking for the PDF to import or the export target.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

/// What the entered path is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAction {
    ImportPdf,
    ExportCsv,
    ExportXlsx,
}

impl PathAction {
    pub fn title(&self) -> &'static str {
        match self {
            Self::ImportPdf => " Import Payslip PDF ",
            Self::ExportCsv => " Export to CSV ",
            Self::ExportXlsx => " Export to Excel ",
        }
    }
}

/// State for the path prompt
#[derive(Debug, Clone)]
pub struct PathPromptState {
    pub action: PathAction,
    pub input: TextInput,
    pub error_message: Option<String>,
}

impl PathPromptState {
    pub fn new(action: PathAction, initial: impl Into<String>) -> Self {
        let placeholder = match action {
            PathAction::ImportPdf => "/path/to/payslip.pdf",
            PathAction::ExportCsv | PathAction::ExportXlsx => "output file",
        };
        let mut input = TextInput::new()
            .label("File")
            .placeholder(placeholder)
            .content(initial)
            .focused(true);
        input.move_end();

        Self {
            action,
            input,
            error_message: None,
        }
    }
}

/// Render the path prompt
pub fn render(frame: &mut Frame, app: &App) {
    let prompt = &app.path_prompt;
    let area = centered_rect_fixed(70, 7, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!("{}- {} ", prompt.action.title(), app.month))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
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
            Constraint::Length(1), // Input
            Constraint::Length(1), // Error
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(&prompt.input, chunks[0]);

    if let Some(ref error) = prompt.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[1],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Confirm  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[3]);
}

/// Handle key input for the path prompt
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let input = &mut app.path_prompt.input;

    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => app.submit_path_prompt(),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        KeyCode::Char(c) => {
            app.path_prompt.error_message = None;
            app.path_prompt.input.insert(c);
        }
        _ => return false,
    }

    true
}
