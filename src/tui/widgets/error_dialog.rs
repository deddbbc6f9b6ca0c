//! Error dialog widget
//!
//! Displays detailed error information with recovery suggestions.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::error::GastosError;

/// An error dialog with details and suggestions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// The error title/summary
    pub title: String,
    /// Detailed error message
    pub details: String,
    /// Suggested recovery actions
    pub suggestions: Vec<String>,
    /// Technical details (for advanced users)
    pub technical: Option<String>,
}

impl ErrorInfo {
    /// Create error info from a GastosError
    pub fn from_error(error: &GastosError) -> Self {
        let (title, details, suggestions, technical) = match error {
            GastosError::Config(msg) => (
                "Configuration Error".to_string(),
                msg.clone(),
                vec![
                    "Check your settings file for syntax errors".to_string(),
                    "Try running 'gastos init' to recreate the configuration".to_string(),
                ],
                None,
            ),
            GastosError::Io(msg) => (
                "I/O Error".to_string(),
                msg.clone(),
                vec![
                    "Check that you have write permissions to the data directory".to_string(),
                    "Ensure there is enough disk space".to_string(),
                ],
                None,
            ),
            GastosError::Csv(msg) => (
                "Month File Error".to_string(),
                format!("Failed to read or write a month file: {}", msg),
                vec![
                    "The month file may have been edited by hand".to_string(),
                    "Open it in a text editor and check the quoting".to_string(),
                ],
                Some(msg.clone()),
            ),
            GastosError::Json(msg) => (
                "Data File Error".to_string(),
                format!("Failed to read or write data: {}", msg),
                vec!["The settings or audit file may be corrupted".to_string()],
                Some(msg.clone()),
            ),
            GastosError::Validation(msg) => (
                "Validation Error".to_string(),
                msg.clone(),
                vec!["Review the input values and try again".to_string()],
                None,
            ),
            GastosError::NotFound {
                entity_type,
                identifier,
            } => (
                format!("{} Not Found", entity_type),
                format!(
                    "Could not find {} '{}'",
                    entity_type.to_lowercase(),
                    identifier
                ),
                vec!["The month file may have changed; reload by switching months".to_string()],
                None,
            ),
            GastosError::Import(msg) => (
                "Import Error".to_string(),
                msg.clone(),
                vec![
                    "Check that the path points to a readable file".to_string(),
                    "Scanned payslips without a text layer cannot be read".to_string(),
                ],
                None,
            ),
            GastosError::Export(msg) => (
                "Export Error".to_string(),
                msg.clone(),
                vec![
                    "Check that you have write permissions to the output path".to_string(),
                    "Months without movements cannot be exported".to_string(),
                ],
                None,
            ),
            GastosError::Storage(msg) => (
                "Storage Error".to_string(),
                msg.clone(),
                vec!["Check that the data directory is accessible".to_string()],
                Some(msg.clone()),
            ),
        };

        Self {
            title,
            details,
            suggestions,
            technical,
        }
    }

    /// Create a simple error info
    pub fn simple(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            details: details.into(),
            suggestions: vec![],
            technical: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

/// Widget for rendering an error dialog
pub struct ErrorDialog<'a> {
    error: &'a ErrorInfo,
}

impl<'a> ErrorDialog<'a> {
    /// Create a new error dialog widget
    pub fn new(error: &'a ErrorInfo) -> Self {
        Self { error }
    }
}

impl<'a> Widget for ErrorDialog<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" Error: {} ", self.error.title))
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        block.render(area, buf);

        // Calculate layout
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Details
                Constraint::Min(1),    // Suggestions
                Constraint::Length(1), // Close hint
            ])
            .split(inner);

        // Render details
        let details = Paragraph::new(self.error.details.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true });
        details.render(chunks[0], buf);

        // Render suggestions
        if !self.error.suggestions.is_empty() {
            let mut lines: Vec<Line> = vec![Line::from(Span::styled(
                "Suggestions:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))];

            for suggestion in &self.error.suggestions {
                lines.push(Line::from(vec![
                    Span::raw("  - "),
                    Span::raw(suggestion.as_str()),
                ]));
            }

            if let Some(technical) = &self.error.technical {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    technical.as_str(),
                    Style::default().fg(Color::DarkGray),
                )));
            }

            let suggestions = Paragraph::new(lines)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true });
            suggestions.render(chunks[1], buf);
        }

        // Render close hint
        let close_hint = Paragraph::new("Press Esc or Enter to close")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        close_hint.render(chunks[2], buf);
    }
}

/// Calculate the area for an error dialog (centered in parent)
pub fn error_dialog_area(parent: Rect) -> Rect {
    let width = (parent.width * 70 / 100).clamp(40, 80).min(parent.width);
    let height = (parent.height * 50 / 100).clamp(10, 20).min(parent.height);

    let x = parent.x + (parent.width - width) / 2;
    let y = parent.y + (parent.height - height) / 2;

    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_info_from_validation_error() {
        let error = GastosError::Validation("Amount must be greater than zero".to_string());
        let info = ErrorInfo::from_error(&error);

        assert_eq!(info.title, "Validation Error");
        assert!(info.details.contains("greater than zero"));
    }

    #[test]
    fn test_error_info_from_not_found() {
        let error = GastosError::movement_not_found("row 3 of 2024-03");
        let info = ErrorInfo::from_error(&error);

        assert_eq!(info.title, "Movement Not Found");
        assert!(info.details.contains("row 3"));
    }

    #[test]
    fn test_error_info_from_import() {
        let error = GastosError::Import("Could not detect the net amount".to_string());
        let info = ErrorInfo::from_error(&error);

        assert_eq!(info.title, "Import Error");
        assert!(!info.suggestions.is_empty());
    }

    #[test]
    fn test_simple_error_info() {
        let info =
            ErrorInfo::simple("Test Error", "Something went wrong").with_suggestion("Try again");

        assert_eq!(info.title, "Test Error");
        assert_eq!(info.details, "Something went wrong");
        assert_eq!(info.suggestions.len(), 1);
    }
}
