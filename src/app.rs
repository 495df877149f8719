//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application: events come in through
//! [`App::update`], and [`App::view`] draws the current state.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::config::Settings;
use crate::control::{CellAddress, TableControl};
use crate::error::AppError;
use crate::events::Event;
use crate::model::{Cell, CellValue, Document, ValueType};
use crate::serialization::{Serializer, StringSerializer};
use crate::strategy::RowAddition;
use crate::ui::{
    render_hints, AddRowButton, Button, CellEditor, DeleteRowButton, EditorAction, GridView,
    HelpAction, HelpView, RowAction, Theme, ToggleAction, ToggleButton,
};

const BROWSE_HINTS: &str =
    "[Enter] open/edit  [Esc] up  [Space] select  [a] add  [d] delete  [s] save  [?] help  [q] quit";
const EDIT_HINTS: &str = "[Enter] commit  [Esc] cancel  [Ctrl+U] clear";
const HELP_HINTS: &str = "[j/k] scroll  [?] close";

/// The current screen state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Moving around the grid.
    #[default]
    Browsing,
    /// Editing a value cell.
    Editing,
    /// Help panel is displayed.
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

/// Severity of a status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Confirmation of a completed action.
    Info,
    /// A failed action; shown in the error color.
    Error,
}

/// One-line feedback shown above the key hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// How the message is styled.
    pub kind: StatusKind,
    /// The message shown to the user.
    pub text: String,
}

/// The cell being edited.
#[derive(Debug, Clone)]
struct EditTarget {
    address: CellAddress,
    ty: ValueType,
    /// The text the editor opened with.
    original: String,
}

/// The main application struct that holds all state.
pub struct App {
    state: AppState,
    should_quit: bool,
    control: TableControl,
    document_path: PathBuf,
    serializer: StringSerializer,
    add_button: AddRowButton,
    delete_button: DeleteRowButton,
    save_button: Button,
    types_toggle: ToggleButton<Button>,
    grid: GridView,
    help: HelpView,
    editor: CellEditor,
    editing: Option<EditTarget>,
    status: Option<StatusMessage>,
    /// Unsaved changes exist.
    dirty: bool,
    /// `q` was pressed once with unsaved changes.
    quit_armed: bool,
    theme: Theme,
}

impl App {
    /// Create an application editing `control`, saving to `document_path`.
    pub fn new(control: TableControl, document_path: impl Into<PathBuf>, settings: &Settings) -> Self {
        let document_path = document_path.into();
        debug!(path = %document_path.display(), "Creating application instance");

        let mut types_toggle = ToggleButton::new(Button::new("Types", 't'));
        types_toggle.set_state(settings.show_column_types);

        let mut app = Self {
            state: AppState::Browsing,
            should_quit: false,
            control,
            document_path,
            serializer: StringSerializer::new(),
            add_button: AddRowButton::new(),
            delete_button: DeleteRowButton::new(),
            save_button: Button::new("Save", 's'),
            types_toggle,
            grid: GridView::new(settings.show_column_types),
            help: HelpView::new(),
            editor: CellEditor::new(),
            editing: None,
            status: None,
            dirty: false,
            quit_armed: false,
            theme: Theme::default(),
        };
        app.refresh_buttons();
        app
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Get the current application state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// The table control.
    pub fn control(&self) -> &TableControl {
        &self.control
    }

    /// Whether there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The current status line message.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Whether the grid shows column types.
    pub fn shows_types(&self) -> bool {
        self.grid.show_types
    }

    /// Path the document is saved to.
    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    /// Update application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.quit();
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {}
        }
    }

    fn quit(&mut self) {
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    fn report(&mut self, error: AppError) {
        warn!(error = %error, "Operation failed");
        self.status = Some(StatusMessage {
            kind: StatusKind::Error,
            text: error.user_message(),
        });
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return;
        }

        match self.state {
            AppState::Help => {
                if let Some(HelpAction::Close) = self.help.handle_input(key_event) {
                    self.state = AppState::Browsing;
                }
            }
            AppState::Editing => match self.editor.handle_input(key_event) {
                Some(EditorAction::Commit(text)) => self.commit_edit(&text),
                Some(EditorAction::Cancel) => {
                    self.editing = None;
                    self.state = AppState::Browsing;
                    self.info("Edit cancelled");
                }
                None => {}
            },
            AppState::Browsing => self.handle_browse_key(key_event),
            AppState::Exiting => {}
        }
    }

    fn handle_browse_key(&mut self, key_event: KeyEvent) {
        let quit_armed = std::mem::take(&mut self.quit_armed);

        match key_event.code {
            KeyCode::Char('q') => {
                if self.dirty && !quit_armed {
                    self.quit_armed = true;
                    self.info("Unsaved changes. Press q again to quit without saving.");
                } else {
                    self.quit();
                }
            }
            KeyCode::Char('?') => {
                self.help.reset_scroll();
                self.state = AppState::Help;
            }
            KeyCode::Up | KeyCode::Char('k') => self.control.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.control.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.control.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.control.move_cursor(0, 1),
            KeyCode::PageDown | KeyCode::Char('n') => {
                self.control.next_page();
            }
            KeyCode::PageUp | KeyCode::Char('p') => {
                self.control.prev_page();
            }
            KeyCode::Char(' ') => {
                self.control.toggle_cursor_selection();
            }
            KeyCode::Enter => self.open_or_edit(),
            KeyCode::Esc | KeyCode::Backspace => {
                if self.control.close_table() {
                    self.refresh_buttons();
                }
            }
            KeyCode::Char('a') => self.add_row(),
            KeyCode::Char('d') => self.delete_rows(),
            KeyCode::Char('t') => {
                if let Some(ToggleAction::Changed(on)) = self.types_toggle.click() {
                    self.grid.show_types = on;
                }
            }
            KeyCode::Char('s') => self.save(),
            _ => {}
        }
    }

    /// Open the nested table under the cursor, or start editing its value.
    fn open_or_edit(&mut self) {
        let Some(address) = self.control.cursor_address() else {
            return;
        };

        let edit = match self.control.cursor_cell() {
            Some(Cell::Value(cell)) => Some((cell.value_type(), self.serializer.serialize(cell.value()))),
            Some(_) => None,
            None => return,
        };

        match edit {
            Some((ty, text)) => {
                let name = self
                    .control
                    .columns()
                    .get(address.column)
                    .map(|column| column.name.clone())
                    .unwrap_or_default();
                self.editor.begin(format!("{} ({})", name, ty), text.clone());
                self.editing = Some(EditTarget {
                    address,
                    ty,
                    original: text,
                });
                self.state = AppState::Editing;
            }
            None => match self.control.open_cell(address) {
                Ok(()) => {
                    self.status = None;
                    self.refresh_buttons();
                }
                Err(e) => self.report(e.into()),
            },
        }
    }

    /// Convert the editor text and store it in the edited cell.
    ///
    /// Unchanged text leaves the cell as it was. An empty field clears a
    /// non-text cell to null. On failure the editor stays open so the input
    /// can be corrected.
    fn commit_edit(&mut self, text: &str) {
        let Some(target) = self.editing.clone() else {
            self.state = AppState::Browsing;
            return;
        };
        if text == target.original {
            self.editing = None;
            self.state = AppState::Browsing;
            return;
        }

        let value = if text.is_empty() && target.ty != ValueType::Text {
            Ok(CellValue::Null)
        } else {
            self.serializer.deserialize_value(text, target.ty)
        };

        let result = value
            .map_err(AppError::from)
            .and_then(|value| {
                self.control
                    .set_cell_value(target.address, value)
                    .map_err(AppError::from)
            });

        match result {
            Ok(()) => {
                debug!(row = %target.address.row, column = target.address.column, "Cell updated");
                self.editing = None;
                self.dirty = true;
                self.state = AppState::Browsing;
                self.info("Cell updated");
            }
            Err(e) => self.report(e),
        }
    }

    fn add_row(&mut self) {
        match self.add_button.press(&mut self.control) {
            Ok(Some(RowAction::RowAdded(RowAddition::Appended(id)))) => {
                self.control.reveal_row(id);
                self.dirty = true;
                self.info(format!("Added row {}", id));
            }
            Ok(Some(RowAction::RowAdded(_))) => {
                self.dirty = true;
                self.info("Created value");
            }
            Ok(_) => self.info("Nothing to add here"),
            Err(e) => self.report(e.into()),
        }
        self.refresh_buttons();
    }

    fn delete_rows(&mut self) {
        match self.delete_button.press(&mut self.control) {
            Ok(Some(RowAction::RowsDeleted(ids))) => {
                self.dirty = true;
                self.info(format!("Deleted {} row(s)", ids.len()));
            }
            Ok(_) => self.info("Nothing to delete"),
            Err(e) => self.report(e.into()),
        }
        self.refresh_buttons();
    }

    fn save(&mut self) {
        match Document::save(&self.document_path, self.control.root()) {
            Ok(()) => {
                self.dirty = false;
                let text = format!("Saved {}", self.document_path.display());
                self.info(text);
            }
            Err(e) => self.report(e.into()),
        }
    }

    fn refresh_buttons(&mut self) {
        self.add_button.refresh(&self.control);
        self.delete_button.refresh(&self.control);
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let editor_height = if self.state == AppState::Editing { 3 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),             // Header
                Constraint::Min(3),                // Grid
                Constraint::Length(editor_height), // Cell editor
                Constraint::Length(1),             // Status line
                Constraint::Length(1),             // Key hints
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.grid.render(frame, chunks[1], &self.control, &self.theme);
        if self.state == AppState::Editing {
            self.editor.render(frame, chunks[2], &self.theme);
        }
        self.render_status(frame, chunks[3]);

        let hints = match self.state {
            AppState::Editing => EDIT_HINTS,
            AppState::Help => HELP_HINTS,
            _ => BROWSE_HINTS,
        };
        render_hints(frame, chunks[4], hints, &self.theme);

        if self.state == AppState::Help {
            self.help.render(frame, centered(area, 70, 80), &self.theme);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let name = self
            .document_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let page = self.control.page();
        let rows = self.control.row_count();

        let mut spans = vec![
            Span::styled("TableForge ", self.theme.header_style()),
            Span::raw(name),
            Span::raw(if self.dirty { "* " } else { "  " }),
            Span::styled(
                format!(
                    "page {}/{}  {} rows  {} selected  ",
                    page.page() + 1,
                    page.page_count(rows),
                    rows,
                    self.control.selector().selected_count()
                ),
                Style::default().fg(self.theme.dim),
            ),
        ];
        for button in [
            self.add_button.button(),
            self.delete_button.button(),
            self.types_toggle.handle(),
            &self.save_button,
        ] {
            spans.extend(button.spans());
            spans.push(Span::raw("  "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let Some(status) = &self.status else {
            return;
        };
        let color = match status.kind {
            StatusKind::Info => self.theme.fg,
            StatusKind::Error => self.theme.error,
        };
        frame.render_widget(
            Paragraph::new(status.text.as_str()).style(Style::default().fg(color)),
            area,
        );
    }
}

/// A rectangle of the given percentage size centered in `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        app: App,
    }

    fn fixture(value: serde_json::Value, page_size: usize) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

        let document = Document::load(&path, &[]).unwrap();
        let control = TableControl::new(document.into_root(), page_size).unwrap();
        let settings = Settings {
            page_size,
            ..Settings::default()
        };
        Fixture {
            _dir: dir,
            app: App::new(control, path, &settings),
        }
    }

    fn inventory() -> Fixture {
        fixture(
            json!([
                {"name": "sword", "qty": 1, "tags": ["sharp", "steel"]},
                {"name": "shield", "qty": 2, "tags": []},
                {"name": "potion", "qty": 5, "tags": null},
            ]),
            10,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.update(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_app_new() {
        let f = inventory();
        assert_eq!(f.app.state(), AppState::Browsing);
        assert!(!f.app.should_quit());
        assert!(!f.app.is_dirty());
        assert!(!f.app.shows_types());
    }

    #[test]
    fn test_quit_on_q_key() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Char('q'));
        assert!(f.app.should_quit());
        assert_eq!(f.app.state(), AppState::Exiting);
    }

    #[test]
    fn test_quit_on_ctrl_c() {
        let mut f = inventory();
        f.app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(f.app.should_quit());
    }

    #[test]
    fn test_quit_event() {
        let mut f = inventory();
        f.app.update(Event::Quit);
        assert!(f.app.should_quit());
    }

    #[test]
    fn test_q_with_unsaved_changes_needs_confirmation() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Char('d'));
        assert!(f.app.is_dirty());

        press(&mut f.app, KeyCode::Char('q'));
        assert!(!f.app.should_quit());
        press(&mut f.app, KeyCode::Char('q'));
        assert!(f.app.should_quit());
    }

    #[test]
    fn test_other_key_disarms_quit() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Char('d'));
        press(&mut f.app, KeyCode::Char('q'));
        press(&mut f.app, KeyCode::Down);
        press(&mut f.app, KeyCode::Char('q'));
        assert!(!f.app.should_quit());
    }

    #[test]
    fn test_help_toggle() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Char('?'));
        assert_eq!(f.app.state(), AppState::Help);
        press(&mut f.app, KeyCode::Char('a'));
        assert_eq!(f.app.control().row_count(), 3);
        press(&mut f.app, KeyCode::Esc);
        assert_eq!(f.app.state(), AppState::Browsing);
    }

    #[test]
    fn test_types_toggle() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Char('t'));
        assert!(f.app.shows_types());
        press(&mut f.app, KeyCode::Char('t'));
        assert!(!f.app.shows_types());
    }

    #[test]
    fn test_add_row_reveals_it() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Char('a'));
        assert_eq!(f.app.control().row_count(), 4);
        assert_eq!(f.app.control().selector().cursor_row(), 3);
        assert!(f.app.is_dirty());
    }

    #[test]
    fn test_delete_selected_rows() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Char(' '));
        press(&mut f.app, KeyCode::Down);
        press(&mut f.app, KeyCode::Char(' '));
        press(&mut f.app, KeyCode::Char('d'));

        let table = f.app.control().table_data().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].cells[0].summary(), "potion");
        assert_eq!(f.app.status().unwrap().text, "Deleted 2 row(s)");
    }

    #[test]
    fn test_edit_value_cell() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Right);
        press(&mut f.app, KeyCode::Enter);
        assert_eq!(f.app.state(), AppState::Editing);

        press(&mut f.app, KeyCode::Backspace);
        type_text(&mut f.app, "42");
        press(&mut f.app, KeyCode::Enter);

        assert_eq!(f.app.state(), AppState::Browsing);
        assert_eq!(f.app.control().cursor_cell().unwrap().summary(), "42");
        assert!(f.app.is_dirty());
    }

    #[test]
    fn test_invalid_edit_keeps_editor_open() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Right);
        press(&mut f.app, KeyCode::Enter);
        type_text(&mut f.app, "x");
        press(&mut f.app, KeyCode::Enter);

        assert_eq!(f.app.state(), AppState::Editing);
        let status = f.app.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("1x"));

        press(&mut f.app, KeyCode::Esc);
        assert_eq!(f.app.state(), AppState::Browsing);
        assert_eq!(f.app.control().cursor_cell().unwrap().summary(), "1");
    }

    #[test]
    fn test_empty_edit_clears_to_null() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Right);
        press(&mut f.app, KeyCode::Enter);
        press(&mut f.app, KeyCode::Backspace);
        press(&mut f.app, KeyCode::Enter);
        assert_eq!(f.app.control().cursor_cell().unwrap().summary(), "null");
    }

    #[test]
    fn test_unchanged_edit_keeps_loaded_json() {
        let mut f = fixture(json!([{"code": 7}, {"code": "x"}]), 10);
        press(&mut f.app, KeyCode::Enter);
        assert_eq!(f.app.state(), AppState::Editing);
        press(&mut f.app, KeyCode::Enter);

        assert_eq!(f.app.state(), AppState::Browsing);
        assert!(!f.app.is_dirty());
        press(&mut f.app, KeyCode::Char('s'));
        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(f.app.document_path()).unwrap())
                .unwrap();
        assert_eq!(saved, json!([{"code": 7}, {"code": "x"}]));
    }

    #[test]
    fn test_open_nested_list_and_go_back() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Right);
        press(&mut f.app, KeyCode::Right);
        press(&mut f.app, KeyCode::Enter);

        assert_eq!(f.app.control().depth(), 1);
        assert_eq!(f.app.control().row_count(), 2);
        assert_eq!(f.app.control().breadcrumb(), "$[0].tags");

        press(&mut f.app, KeyCode::Esc);
        assert_eq!(f.app.control().depth(), 0);
        assert_eq!(f.app.control().selector().cursor_column(), 2);
    }

    #[test]
    fn test_add_into_null_list() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Down);
        press(&mut f.app, KeyCode::Down);
        press(&mut f.app, KeyCode::Right);
        press(&mut f.app, KeyCode::Right);
        press(&mut f.app, KeyCode::Enter);
        assert_eq!(f.app.control().row_count(), 0);

        press(&mut f.app, KeyCode::Char('a'));
        assert_eq!(f.app.control().row_count(), 1);
    }

    #[test]
    fn test_save_writes_document() {
        let mut f = inventory();
        press(&mut f.app, KeyCode::Char('d'));
        press(&mut f.app, KeyCode::Char('s'));
        assert!(!f.app.is_dirty());

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(f.app.document_path()).unwrap())
                .unwrap();
        assert_eq!(saved.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_paging_keys() {
        let mut f = fixture(json!([1, 2, 3, 4, 5]), 2);
        press(&mut f.app, KeyCode::Char('n'));
        assert_eq!(f.app.control().page().page(), 1);
        press(&mut f.app, KeyCode::PageDown);
        assert_eq!(f.app.control().page().page(), 2);
        press(&mut f.app, KeyCode::Char('p'));
        assert_eq!(f.app.control().page().page(), 1);
    }

    #[test]
    fn test_view_renders_every_state() {
        let mut f = inventory();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| f.app.view(frame)).unwrap();

        press(&mut f.app, KeyCode::Right);
        press(&mut f.app, KeyCode::Enter);
        terminal.draw(|frame| f.app.view(frame)).unwrap();

        press(&mut f.app, KeyCode::Esc);
        press(&mut f.app, KeyCode::Char('?'));
        terminal.draw(|frame| f.app.view(frame)).unwrap();
    }
}
