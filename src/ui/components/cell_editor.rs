//! Single-line editor for value cells.
//!
//! The editor works on text only. Converting the committed text into a
//! typed value is left to the caller, which owns the serializer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Theme;

/// Actions returned by the cell editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// The user confirmed the text.
    Commit(String),
    /// The user abandoned the edit.
    Cancel,
}

/// A text field with a character cursor.
#[derive(Debug, Clone, Default)]
pub struct CellEditor {
    value: String,
    /// Cursor position in characters, not bytes.
    cursor: usize,
    label: String,
}

impl CellEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `value`, with the cursor at the end.
    pub fn begin(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.label = label.into();
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<EditorAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => return Some(EditorAction::Commit(self.value.clone())),
            (KeyCode::Esc, _) => return Some(EditorAction::Cancel),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.value.clear();
                self.cursor = 0;
            }
            (KeyCode::Char('a'), KeyModifiers::CONTROL) | (KeyCode::Home, _) => self.cursor = 0,
            (KeyCode::Char('e'), KeyModifiers::CONTROL) | (KeyCode::End, _) => {
                self.cursor = self.char_count();
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
            }
            (KeyCode::Backspace, _) if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            (KeyCode::Delete, _) if self.cursor < self.char_count() => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            (KeyCode::Left, _) => self.cursor = self.cursor.saturating_sub(1),
            (KeyCode::Right, _) => self.cursor = (self.cursor + 1).min(self.char_count()),
            _ => {}
        }
        None
    }

    /// Render the editor as a bordered field titled with the label.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = Style::default().fg(theme.highlight);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.label),
                border.add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(border);

        frame.render_widget(
            Paragraph::new(self.value.as_str())
                .style(Style::default().fg(theme.fg))
                .block(block),
            area,
        );

        let cursor_x = area.x + 1 + self.cursor as u16;
        if cursor_x < area.x + area.width.saturating_sub(1) {
            frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(editor: &mut CellEditor, text: &str) {
        for c in text.chars() {
            editor.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_begin_places_cursor_at_end() {
        let mut editor = CellEditor::new();
        editor.begin("qty", "42");
        assert_eq!(editor.value(), "42");
        assert_eq!(editor.cursor(), 2);
        assert_eq!(editor.label(), "qty");
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut editor = CellEditor::new();
        type_text(&mut editor, "abc");
        editor.handle_input(key(KeyCode::Backspace));
        assert_eq!(editor.value(), "ab");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut editor = CellEditor::new();
        editor.begin("x", "ac");
        editor.handle_input(key(KeyCode::Left));
        type_text(&mut editor, "b");
        assert_eq!(editor.value(), "abc");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut editor = CellEditor::new();
        editor.begin("name", "héllo");
        editor.handle_input(key(KeyCode::Home));
        editor.handle_input(key(KeyCode::Right));
        editor.handle_input(key(KeyCode::Delete));
        assert_eq!(editor.value(), "hllo");
        type_text(&mut editor, "é");
        assert_eq!(editor.value(), "héllo");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut editor = CellEditor::new();
        editor.begin("x", "hello");
        editor.handle_input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(editor.value(), "");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn test_commit_and_cancel() {
        let mut editor = CellEditor::new();
        editor.begin("x", "7");
        assert_eq!(
            editor.handle_input(key(KeyCode::Enter)),
            Some(EditorAction::Commit("7".to_string()))
        );
        assert_eq!(
            editor.handle_input(key(KeyCode::Esc)),
            Some(EditorAction::Cancel)
        );
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut editor = CellEditor::new();
        editor.begin("x", "ab");
        editor.handle_input(key(KeyCode::Right));
        assert_eq!(editor.cursor(), 2);
        editor.handle_input(key(KeyCode::Home));
        editor.handle_input(key(KeyCode::Left));
        assert_eq!(editor.cursor(), 0);
        assert_eq!(editor.handle_input(key(KeyCode::Backspace)), None);
        assert_eq!(editor.value(), "ab");
    }
}
