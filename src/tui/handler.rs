//! Event handler for the TUI
//!
//! Routes keyboard events to the open dialog, the search bar or the
//! movement table.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, App, InputMode};
use super::dialogs::{self, PathAction};
use super::event::Event;
use crate::models::MovementKind;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(_, _) | Event::Tick => {}
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),

        KeyCode::Left | KeyCode::Char('h') => app.prev_month(),
        KeyCode::Right | KeyCode::Char('l') => app.next_month(),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),

        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc => {
            if app.is_filtered() {
                app.clear_search();
            }
            app.clear_status();
        }

        KeyCode::Char('i') | KeyCode::Char('a') => {
            app.open_dialog(ActiveDialog::AddMovement(MovementKind::Income))
        }
        KeyCode::Char('w') | KeyCode::Char('r') => {
            app.open_dialog(ActiveDialog::AddMovement(MovementKind::Withdrawal))
        }
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),

        KeyCode::Char('p') => app.open_dialog(ActiveDialog::PathPrompt(PathAction::ImportPdf)),
        KeyCode::Char('e') => app.open_dialog(ActiveDialog::PathPrompt(PathAction::ExportCsv)),
        KeyCode::Char('x') => app.open_dialog(ActiveDialog::PathPrompt(PathAction::ExportXlsx)),

        _ => {}
    }
}

/// Handle keys while typing in the search bar
fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => app.finish_search(),
        KeyCode::Backspace => app.search.backspace(),
        KeyCode::Delete => app.search.delete(),
        KeyCode::Left => app.search.move_left(),
        KeyCode::Right => app.search.move_right(),
        KeyCode::Home => app.search.move_start(),
        KeyCode::End => app.search.move_end(),
        KeyCode::Char(c) => app.search.insert(c),
        _ => return,
    }

    app.selected_index = 0;
    app.refresh_visible();
}

/// Handle keys when a dialog is active
fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog.clone() {
        ActiveDialog::None => {}
        ActiveDialog::Help | ActiveDialog::Error(_) => app.close_dialog(),
        ActiveDialog::AddMovement(_) => {
            dialogs::movement::handle_key(app, key);
        }
        ActiveDialog::ConfirmDelete(movement) => {
            dialogs::confirm::handle_delete_key(app, &movement, key);
        }
        ActiveDialog::PathPrompt(_) => {
            dialogs::path_prompt::handle_key(app, key);
        }
    }
}
