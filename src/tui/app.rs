//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use std::path::Path;

use crate::config::settings::Settings;
use crate::error::{GastosError, GastosResult};
use crate::export::{export_month, ExportFormat};
use crate::models::{Money, MonthKey, Movement, MovementKind};
use crate::services::{
    compute_balance, filter_movements, CreateMovementInput, MovementService, PayslipImportService,
};
use crate::storage::{MonthLedger, Storage};

use super::dialogs::movement::MovementFormState;
use super::dialogs::path_prompt::{PathAction, PathPromptState};
use super::widgets::{ErrorInfo, TextInput};

/// Mode of input outside dialogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search bar
    Search,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    AddMovement(MovementKind),
    ConfirmDelete(Movement),
    PathPrompt(PathAction),
    Error(ErrorInfo),
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Month being viewed
    pub month: MonthKey,

    /// Contents of the viewed month
    pub ledger: MonthLedger,

    /// Rows shown in the table: newest first, filtered by the search
    pub visible: Vec<Movement>,

    /// Selected row in `visible`
    pub selected_index: usize,

    /// Current input mode
    pub input_mode: InputMode,

    /// Search bar
    pub search: TextInput,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Manual entry form state
    pub movement_form: MovementFormState,

    /// Path prompt state (PDF import, exports)
    pub path_prompt: PathPromptState,

    /// Status message to display
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new App instance showing the current month
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        let month = MonthKey::current();
        Self {
            storage,
            settings,
            should_quit: false,
            month,
            ledger: MonthLedger::new(month),
            visible: Vec::new(),
            selected_index: 0,
            input_mode: InputMode::default(),
            search: TextInput::new().label("Search").placeholder("text, date or category"),
            active_dialog: ActiveDialog::default(),
            movement_form: MovementFormState::new(MovementKind::Income),
            path_prompt: PathPromptState::new(PathAction::ImportPdf, ""),
            status_message: None,
        }
    }

    /// Create the current month's file if needed and load it
    pub fn start(&mut self) {
        self.set_month(self.month);
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Show an error in the modal error dialog
    pub fn show_error(&mut self, error: &GastosError) {
        log::warn!("{}", error);
        self.active_dialog = ActiveDialog::Error(ErrorInfo::from_error(error));
    }

    /// Show the error dialog if `result` failed
    pub fn report<T>(&mut self, result: GastosResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.show_error(&e);
                None
            }
        }
    }

    /// Re-read the viewed month from disk
    pub fn reload(&mut self) -> GastosResult<()> {
        self.ledger = self.storage.ledger.read_month(&self.month)?;
        if !self.ledger.malformed.is_empty() {
            self.set_status(format!(
                "{} unreadable row(s) ignored",
                self.ledger.malformed.len()
            ));
        }
        self.refresh_visible();
        Ok(())
    }

    /// Recompute the visible rows after a ledger or search change
    pub fn refresh_visible(&mut self) {
        self.visible = filter_movements(&self.ledger.newest_first(), self.search.value());
        if self.selected_index >= self.visible.len() {
            self.selected_index = self.visible.len().saturating_sub(1);
        }
    }

    /// Balance of the whole viewed month
    pub fn balance(&self) -> Money {
        compute_balance(&self.ledger.movements)
    }

    /// The movement under the cursor
    pub fn selected_movement(&self) -> Option<&Movement> {
        self.visible.get(self.selected_index)
    }

    /// Whether a search filter is applied
    pub fn is_filtered(&self) -> bool {
        !self.search.value().trim().is_empty()
    }

    /// Switch to another month, creating its file if needed
    pub fn set_month(&mut self, month: MonthKey) {
        self.month = month;
        self.selected_index = 0;
        self.clear_status();
        let result = self
            .storage
            .ledger
            .initialize_month(&self.month)
            .and_then(|_| self.reload());
        self.report(result);
    }

    /// Go to previous month
    pub fn prev_month(&mut self) {
        self.set_month(self.month.prev());
    }

    /// Go to next month
    pub fn next_month(&mut self) {
        self.set_month(self.month.next());
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.visible.len() {
            self.selected_index += 1;
        }
    }

    /// Enter search mode
    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.search.focused = true;
        self.search.move_end();
    }

    /// Leave search mode, keeping the filter
    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search.focused = false;
    }

    /// Leave search mode and drop the filter
    pub fn clear_search(&mut self) {
        self.finish_search();
        self.search.clear();
        self.selected_index = 0;
        self.refresh_visible();
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match &dialog {
            ActiveDialog::AddMovement(kind) => {
                self.movement_form = MovementFormState::new(*kind);
            }
            ActiveDialog::PathPrompt(action) => {
                let initial = match action {
                    PathAction::ImportPdf => String::new(),
                    PathAction::ExportCsv => ExportFormat::Csv.default_file_name(&self.month),
                    PathAction::ExportXlsx => ExportFormat::Xlsx.default_file_name(&self.month),
                };
                self.path_prompt = PathPromptState::new(*action, initial);
            }
            _ => {}
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Ask for confirmation before deleting the selected movement
    pub fn request_delete(&mut self) {
        match self.selected_movement().cloned() {
            Some(movement) => self.open_dialog(ActiveDialog::ConfirmDelete(movement)),
            None => self.set_status("Nothing to delete"),
        }
    }

    /// Save the manual entry form
    ///
    /// Input problems stay in the form; other failures close it and show the
    /// error dialog.
    pub fn save_movement_form(&mut self) {
        let (amount, timestamp) = match self.movement_form.parse() {
            Ok(parsed) => parsed,
            Err(message) => {
                self.movement_form.set_error(message);
                return;
            }
        };

        let form = &self.movement_form;
        let mut input = CreateMovementInput::new(form.kind, amount, form.description.value());
        input.category = Some(form.category.value().to_string());
        input.timestamp = Some(timestamp);
        input.month = Some(self.month);

        let service = MovementService::new(self.storage)
            .with_default_category(self.settings.default_category.clone());

        match service.add(input) {
            Ok((_, movement)) => {
                self.close_dialog();
                self.set_status(format!("Added {} {}", movement.kind, movement.description));
                let result = self.reload();
                self.report(result);
            }
            Err(e) if e.is_validation() => self.movement_form.set_error(e.to_string()),
            Err(e) => self.show_error(&e),
        }
    }

    /// Delete every row matching `movement` after confirmation
    pub fn confirm_delete(&mut self, movement: &Movement) {
        self.close_dialog();
        let service = MovementService::new(self.storage);

        let result = service.delete_matching(&self.month, movement);
        if let Some(removed) = self.report(result) {
            self.set_status(format!("Deleted {} row(s)", removed));
        }

        let result = self.reload();
        self.report(result);
    }

    /// Run the action of the path prompt
    pub fn submit_path_prompt(&mut self) {
        let path = self.path_prompt.input.value().trim().to_string();
        if path.is_empty() {
            self.path_prompt.error_message = Some("Enter a file path".to_string());
            return;
        }

        let action = self.path_prompt.action;
        self.close_dialog();

        let result = match action {
            PathAction::ImportPdf => self.import_pdf(Path::new(&path)),
            PathAction::ExportCsv => self.export(ExportFormat::Csv, Path::new(&path)),
            PathAction::ExportXlsx => self.export(ExportFormat::Xlsx, Path::new(&path)),
        };
        self.report(result);
    }

    fn import_pdf(&mut self, path: &Path) -> GastosResult<()> {
        let imported = PayslipImportService::new(self.storage, self.settings).import(path, &self.month)?;
        self.set_status(format!(
            "Imported payslip: {}",
            imported
                .movement
                .amount
                .format_with_symbol(&self.settings.currency_symbol)
        ));
        self.reload()
    }

    fn export(&mut self, format: ExportFormat, path: &Path) -> GastosResult<()> {
        let rows = export_month(
            self.storage,
            &self.month,
            format,
            path,
            &self.settings.currency_symbol,
        )?;
        self.set_status(format!("Exported {} rows to {}", rows, path.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::GastosPaths;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = GastosPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn march() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    fn seed(storage: &Storage) {
        let ts = |d: u32| {
            NaiveDate::from_ymd_opt(2024, 3, d)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        };
        for (day, kind, desc, cents) in [
            (1, MovementKind::Income, "Nómina", 150_000),
            (5, MovementKind::Withdrawal, "Mercadona", 8_000),
            (9, MovementKind::Withdrawal, "Cine", 1_500),
        ] {
            let movement = Movement::new(ts(day), kind, desc, Money::from_cents(cents), "General");
            storage.ledger.append(&march(), &movement).unwrap();
        }
    }

    #[test]
    fn test_month_navigation_loads_ledger() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        app.set_month(march().next());
        assert!(app.visible.is_empty());

        app.prev_month();
        assert_eq!(app.month, march());
        assert_eq!(app.visible.len(), 3);
        assert_eq!(app.visible[0].description, "Cine");
        assert_eq!(app.balance().cents(), 140_500);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);
        app.set_month(march());

        app.move_up();
        assert_eq!(app.selected_index, 0);
        for _ in 0..10 {
            app.move_down();
        }
        assert_eq!(app.selected_index, 2);
        assert_eq!(app.selected_movement().unwrap().description, "Nómina");
    }

    #[test]
    fn test_search_filters_and_clears() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);
        app.set_month(march());

        app.start_search();
        for c in "merca".chars() {
            app.search.insert(c);
        }
        app.refresh_visible();
        assert_eq!(app.visible.len(), 1);
        assert!(app.is_filtered());
        assert_eq!(app.balance().cents(), 140_500);

        app.clear_search();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.visible.len(), 3);
    }

    #[test]
    fn test_confirm_delete_reloads() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);
        app.set_month(march());

        app.request_delete();
        let target = match &app.active_dialog {
            ActiveDialog::ConfirmDelete(movement) => movement.clone(),
            other => panic!("unexpected dialog {:?}", other),
        };
        app.confirm_delete(&target);

        assert!(!app.has_dialog());
        assert_eq!(app.visible.len(), 2);
        assert_eq!(app.status_message.as_deref(), Some("Deleted 1 row(s)"));
    }

    #[test]
    fn test_delete_while_searching_removes_selected() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);
        app.set_month(march());

        app.start_search();
        for c in "retiro".chars() {
            app.search.insert(c);
        }
        app.refresh_visible();
        app.finish_search();
        app.move_down();

        let selected = app.selected_movement().cloned().unwrap();
        assert_eq!(selected.description, "Mercadona");

        app.request_delete();
        assert_eq!(app.active_dialog, ActiveDialog::ConfirmDelete(selected.clone()));
        app.confirm_delete(&selected);

        let remaining: Vec<_> = app
            .ledger
            .movements
            .iter()
            .map(|m| m.description.as_str())
            .collect();
        assert_eq!(remaining, vec!["Nómina", "Cine"]);
        assert_eq!(app.visible.len(), 1);
        assert_eq!(app.visible[0].description, "Cine");
    }

    #[test]
    fn test_browsing_creates_month_file() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        app.set_month(march());
        app.next_month();

        let months = storage.ledger.list_months().unwrap();
        assert!(months.contains(&march()));
        assert!(months.contains(&march().next()));
        assert!(app.visible.is_empty());
    }

    #[test]
    fn test_export_of_empty_month_shows_error() {
        let (temp, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);
        app.set_month(march());

        app.open_dialog(ActiveDialog::PathPrompt(PathAction::ExportCsv));
        app.path_prompt.input = TextInput::new().content(
            temp.path().join("out.csv").to_string_lossy().into_owned(),
        );
        app.submit_path_prompt();

        match &app.active_dialog {
            ActiveDialog::Error(info) => assert_eq!(info.title, "Export Error"),
            other => panic!("unexpected dialog {:?}", other),
        }
    }

    #[test]
    fn test_import_missing_pdf_shows_error() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        app.open_dialog(ActiveDialog::PathPrompt(PathAction::ImportPdf));
        app.path_prompt.input = TextInput::new().content("/no/such/payslip.pdf");
        app.submit_path_prompt();

        assert!(matches!(app.active_dialog, ActiveDialog::Error(_)));
    }
}
