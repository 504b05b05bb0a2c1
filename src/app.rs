use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use std::sync::mpsc;
use std::time::Duration;

use crate::analysis::AnalysisClient;
use crate::compare::CompareSelection;
use crate::config::Config;
use crate::export::{export_records, ExportFormat};
use crate::filter::{PhotoFilter, ALL_CATEGORIES};
use crate::store::{PhotoRecord, PhotoStore, CATEGORIES};
use crate::ui;
use crate::ui::edit_dialog::EditDialog;
use crate::ui::upload_dialog::UploadDialog;
use crate::upload::{spawn_upload, UploadStage, UploadUpdate};

/// The three navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    Database,
    Compare,
}

impl View {
    pub fn all() -> [View; 3] {
        [View::Overview, View::Database, View::Compare]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Database => "Database",
            View::Compare => "Compare",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Overview => 0,
            View::Database => 1,
            View::Compare => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Help,
    Searching,
    Uploading,
    Editing,
}

/// Database view rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Gallery,
    Table,
}

pub struct App {
    pub config: Config,
    pub store: PhotoStore,
    pub view: View,
    pub mode: AppMode,
    pub should_quit: bool,
    pub status_message: Option<String>,
    // Database view state
    pub filter: PhotoFilter,
    pub view_mode: ViewMode,
    pub selected_index: usize,
    // Compare view state
    pub compare: CompareSelection,
    pub compare_index: usize,
    pub show_metadata: bool,
    // Upload pipeline state
    pub analysis_client: AnalysisClient,
    pub upload_dialog: Option<UploadDialog>,
    pub upload_stage: Option<UploadStage>,
    upload_rx: Option<mpsc::Receiver<UploadUpdate>>,
    // Advisory re-entry guard; one upload in flight at a time
    pub upload_in_flight: bool,
    // Edit dialog state
    pub edit_dialog: Option<EditDialog>,
}

impl App {
    pub fn new(config: Config, store: PhotoStore) -> Result<Self> {
        let analysis_client = AnalysisClient::from_config(&config.analysis);
        tracing::info!(
            provider = analysis_client.provider_name(),
            records = store.len(),
            "Application ready"
        );

        Ok(Self {
            config,
            store,
            view: View::Overview,
            mode: AppMode::Normal,
            should_quit: false,
            status_message: None,
            filter: PhotoFilter::default(),
            view_mode: ViewMode::Table,
            selected_index: 0,
            compare: CompareSelection::new(),
            compare_index: 0,
            show_metadata: true,
            analysis_client,
            upload_dialog: None,
            upload_stage: None,
            upload_rx: None,
            upload_in_flight: false,
            edit_dialog: None,
        })
    }

    /// Records passing the current filter, in store order.
    pub fn filtered_records(&self) -> Vec<&PhotoRecord> {
        self.filter.apply(self.store.records())
    }

    /// Category tab labels: the "All" sentinel plus the known categories.
    pub fn category_tabs() -> Vec<&'static str> {
        let mut tabs = vec![ALL_CATEGORIES];
        tabs.extend_from_slice(CATEGORIES);
        tabs
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        while !self.should_quit {
            self.poll_upload();

            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key)?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Drain updates from an in-flight upload. Store mutation happens
    /// here, on the event loop, in the order updates arrived.
    fn poll_upload(&mut self) {
        let Some(rx) = &self.upload_rx else {
            return;
        };

        let mut updates = Vec::new();
        while let Ok(update) = rx.try_recv() {
            updates.push(update);
        }

        let mut finished = false;
        for update in updates {
            match update {
                UploadUpdate::Stage(stage) => {
                    self.upload_stage = Some(stage);
                }
                UploadUpdate::Finished {
                    record,
                    used_fallback,
                } => {
                    let filename = record.filename.clone();
                    match self.store.add(*record) {
                        Ok(()) if used_fallback => {
                            self.status_message = Some(format!(
                                "Uploaded {} (analysis unavailable, placeholder metadata)",
                                filename
                            ));
                        }
                        Ok(()) => {
                            self.status_message =
                                Some(format!("Uploaded and analyzed {}", filename));
                        }
                        Err(e) => {
                            self.status_message =
                                Some(format!("Failed to save {}: {}", filename, e));
                        }
                    }
                    finished = true;
                }
                UploadUpdate::Failed(error) => {
                    self.status_message = Some(format!("Upload failed: {}", error));
                    finished = true;
                }
            }
        }

        if finished {
            self.upload_rx = None;
            self.upload_stage = None;
            self.upload_in_flight = false;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.mode {
            AppMode::Help => self.handle_help_key(key),
            AppMode::Searching => self.handle_search_key(key),
            AppMode::Uploading => self.handle_upload_dialog_key(key),
            AppMode::Editing => self.handle_edit_dialog_key(key),
            AppMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                self.mode = AppMode::Normal;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        // Global keys
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('?') => {
                self.mode = AppMode::Help;
                return Ok(());
            }
            KeyCode::Char('1') => {
                self.view = View::Overview;
                return Ok(());
            }
            KeyCode::Char('2') => {
                self.view = View::Database;
                return Ok(());
            }
            KeyCode::Char('3') => {
                self.view = View::Compare;
                return Ok(());
            }
            KeyCode::Tab => {
                let next = (self.view.index() + 1) % 3;
                self.view = View::all()[next];
                return Ok(());
            }
            _ => {}
        }

        match self.view {
            View::Overview => Ok(()),
            View::Database => self.handle_database_key(key),
            View::Compare => self.handle_compare_key(key),
        }
    }

    fn handle_database_key(&mut self, key: KeyEvent) -> Result<()> {
        let filtered_len = self.filtered_records().len();

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if filtered_len > 0 && self.selected_index < filtered_len - 1 {
                    self.selected_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            KeyCode::Char('/') => {
                self.mode = AppMode::Searching;
            }
            KeyCode::Char('c') => {
                self.cycle_category(1);
            }
            KeyCode::Char('C') => {
                self.cycle_category(-1);
            }
            KeyCode::Char('g') => {
                self.view_mode = match self.view_mode {
                    ViewMode::Gallery => ViewMode::Table,
                    ViewMode::Table => ViewMode::Gallery,
                };
            }
            KeyCode::Char('u') => {
                if self.upload_in_flight {
                    self.status_message = Some("An upload is already in progress".to_string());
                } else {
                    self.upload_dialog = Some(UploadDialog::new());
                    self.mode = AppMode::Uploading;
                }
            }
            KeyCode::Char('d') => {
                self.delete_selected()?;
            }
            KeyCode::Char('e') => {
                if let Some(record) = self.selected_record() {
                    let dialog = EditDialog::for_record(record);
                    self.edit_dialog = Some(dialog);
                    self.mode = AppMode::Editing;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(record) = self.selected_record() {
                    let id = record.id.clone();
                    self.compare.toggle(&id);
                }
            }
            KeyCode::Char('x') => {
                self.export(ExportFormat::Csv);
            }
            KeyCode::Char('X') => {
                self.export(ExportFormat::Json);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_compare_key(&mut self, key: KeyEvent) -> Result<()> {
        let total = self.store.len();

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if total > 0 && self.compare_index < total - 1 {
                    self.compare_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.compare_index = self.compare_index.saturating_sub(1);
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(record) = self.store.records().get(self.compare_index) {
                    let id = record.id.clone();
                    self.compare.toggle(&id);
                }
            }
            KeyCode::Char('i') => {
                self.show_metadata = !self.show_metadata;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.mode = AppMode::Normal;
            }
            KeyCode::Backspace => {
                self.filter.query.pop();
                self.selected_index = 0;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.query.clear();
                self.selected_index = 0;
            }
            KeyCode::Char(c) => {
                self.filter.query.push(c);
                self.selected_index = 0;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_upload_dialog_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(dialog) = self.upload_dialog.as_mut() else {
            self.mode = AppMode::Normal;
            return Ok(());
        };

        match key.code {
            KeyCode::Esc => {
                self.upload_dialog = None;
                self.mode = AppMode::Normal;
            }
            KeyCode::Enter => {
                let path = dialog.path_buf();
                self.upload_dialog = None;
                self.mode = AppMode::Normal;
                if path.as_os_str().is_empty() {
                    self.status_message = Some("No file given".to_string());
                } else {
                    self.upload_in_flight = true;
                    self.upload_stage = Some(UploadStage::Reading);
                    self.upload_rx = Some(spawn_upload(path, self.analysis_client.clone()));
                }
            }
            KeyCode::Backspace => dialog.backspace(),
            KeyCode::Left => dialog.move_cursor_left(),
            KeyCode::Right => dialog.move_cursor_right(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => dialog.clear(),
            KeyCode::Char(c) => dialog.handle_char(c),
            _ => {}
        }
        Ok(())
    }

    fn handle_edit_dialog_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.edit_dialog = None;
                self.mode = AppMode::Normal;
            }
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
                if let Some(dialog) = self.edit_dialog.take() {
                    if let Some(original) = self.store.get(&dialog.record_id) {
                        let updated = dialog.apply_to(original.clone());
                        self.store.update(updated)?;
                        self.status_message = Some("Record updated".to_string());
                    }
                }
            }
            _ => {
                let Some(dialog) = self.edit_dialog.as_mut() else {
                    self.mode = AppMode::Normal;
                    return Ok(());
                };
                match key.code {
                    KeyCode::Tab => dialog.cycle_category(),
                    KeyCode::Backspace => dialog.backspace(),
                    KeyCode::Left => dialog.move_cursor_left(),
                    KeyCode::Right => dialog.move_cursor_right(),
                    KeyCode::Char(c) => dialog.handle_char(c),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn cycle_category(&mut self, direction: isize) {
        let tabs = Self::category_tabs();
        let current = tabs
            .iter()
            .position(|c| *c == self.filter.category)
            .unwrap_or(0);
        let next = (current as isize + direction).rem_euclid(tabs.len() as isize) as usize;
        self.filter.category = tabs[next].to_string();
        self.selected_index = 0;
    }

    fn selected_record(&self) -> Option<&PhotoRecord> {
        self.filtered_records().get(self.selected_index).copied()
    }

    fn delete_selected(&mut self) -> Result<()> {
        let Some(record) = self.selected_record() else {
            return Ok(());
        };
        let id = record.id.clone();
        let filename = record.filename.clone();

        self.store.delete(&id)?;
        let store = &self.store;
        self.compare.retain_known(|sel| store.get(sel).is_some());

        let filtered_len = self.filtered_records().len();
        if filtered_len > 0 && self.selected_index >= filtered_len {
            self.selected_index = filtered_len - 1;
        }
        if self.compare_index >= self.store.len() && !self.store.is_empty() {
            self.compare_index = self.store.len() - 1;
        }

        self.status_message = Some(format!("Deleted {}", filename));
        Ok(())
    }

    fn export(&mut self, format: ExportFormat) {
        let result = {
            let records = self.filtered_records();
            export_records(&records, &self.config.export.dir, format)
        };
        match result {
            Ok((path, count)) => {
                self.status_message = Some(format!(
                    "Exported {} records as {} to {}",
                    count,
                    format.name(),
                    path.display()
                ));
            }
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.status_message = Some(format!("Export failed: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::seed_records;
    use tempfile::TempDir;

    fn test_app(dir: &TempDir) -> App {
        let store = PhotoStore::with_records(seed_records(), &dir.path().join("photos.json"));
        let mut config = Config::default();
        config.export.dir = dir.path().to_path_buf();
        App::new(config, store).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    #[test]
    fn test_view_navigation() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.view, View::Database);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Compare);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Overview);
    }

    #[test]
    fn test_search_narrows_filtered_records() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.view = View::Database;

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, AppMode::Searching);
        for c in "forest".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        let filtered = app.filtered_records();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].filename, "forest_mist.jpg");
    }

    #[test]
    fn test_category_cycle_wraps() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.view = View::Database;

        assert_eq!(app.filter.category, ALL_CATEGORIES);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.filter.category, "Nature");
        press(&mut app, KeyCode::Char('C'));
        assert_eq!(app.filter.category, ALL_CATEGORIES);
        press(&mut app, KeyCode::Char('C'));
        assert_eq!(app.filter.category, "Other");
    }

    #[test]
    fn test_delete_selected_removes_from_store_and_selection() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.view = View::Database;

        let first_id = app.filtered_records()[0].id.clone();
        app.compare.toggle(&first_id);
        press(&mut app, KeyCode::Char('d'));

        assert!(app.store.get(&first_id).is_none());
        assert!(!app.compare.contains(&first_id));
        assert_eq!(app.store.len(), 3);
    }

    #[test]
    fn test_compare_toggle_from_database_view() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.view = View::Database;

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.compare.len(), 1);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.compare.is_empty());
    }

    #[test]
    fn test_edit_dialog_updates_record() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.view = View::Database;

        let id = app.filtered_records()[0].id.clone();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, AppMode::Editing);
        for c in " edited".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.store.get(&id).unwrap().notes.ends_with(" edited"));
    }

    #[test]
    fn test_upload_busy_flag_blocks_dialog() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.view = View::Database;
        app.upload_in_flight = true;

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.upload_dialog.is_none());
    }
}
