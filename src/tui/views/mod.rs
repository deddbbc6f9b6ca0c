//! TUI Views module
//!
//! The month view (header, search bar, movement table) and the status bar.

pub mod movements;
pub mod status_bar;

use ratatui::Frame;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;
use super::widgets::{error_dialog_area, ErrorDialog};

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    movements::render_header(frame, app, layout.header);
    movements::render_search(frame, app, layout.search);
    movements::render_table(frame, app, layout.table);
    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match &app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame),
        ActiveDialog::AddMovement(_) => dialogs::movement::render(frame, app),
        ActiveDialog::ConfirmDelete(movement) => {
            dialogs::confirm::render(frame, &dialogs::confirm::delete_message(movement));
        }
        ActiveDialog::PathPrompt(_) => dialogs::path_prompt::render(frame, app),
        ActiveDialog::Error(info) => {
            let area = error_dialog_area(frame.area());
            frame.render_widget(ErrorDialog::new(info), area);
        }
        ActiveDialog::None => {}
    }
}
