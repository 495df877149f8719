//! Help panel listing the editor's keyboard shortcuts.
//!
//! Opened with `?` and closed with `?`, `q` or Escape. The panel scrolls
//! when the terminal is too short to show every binding.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::logging;
use crate::ui::theme::Theme;

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    /// Close the help panel.
    Close,
}

/// Keyboard shortcuts grouped by section.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("arrows / hjkl", "Move the cursor"),
            ("n / PgDn", "Next page"),
            ("p / PgUp", "Previous page"),
            ("Enter", "Open a nested table or edit a value"),
            ("Esc / Backspace", "Back to the parent table"),
        ],
    ),
    (
        "Rows",
        &[
            ("Space", "Select or deselect the row"),
            ("a", "Add a row (or create a null object)"),
            ("d", "Delete selected rows, or the last row"),
        ],
    ),
    (
        "Editing",
        &[
            ("Enter", "Commit the value"),
            ("Esc", "Cancel the edit"),
            ("Ctrl+U", "Clear the field"),
        ],
    ),
    (
        "General",
        &[
            ("t", "Show or hide column types"),
            ("s", "Save the document"),
            ("?", "Toggle this help"),
            ("q / Ctrl+C", "Quit"),
        ],
    ),
];

/// The help panel view.
#[derive(Debug, Default)]
pub struct HelpView {
    scroll: usize,
    /// Updated on render.
    visible_height: usize,
}

impl HelpView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset scroll position to top.
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn total_lines() -> usize {
        // Header and blank line per section, plus the footer lines.
        SECTIONS
            .iter()
            .map(|(_, bindings)| bindings.len() + 3)
            .sum::<usize>()
            + 2
    }

    fn max_scroll(&self) -> usize {
        Self::total_lines().saturating_sub(self.visible_height)
    }

    /// Handle keyboard input for the help view.
    pub fn handle_input(&mut self, key_event: KeyEvent) -> Option<HelpAction> {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('?'), KeyModifiers::NONE)
            | (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Esc, _) => Some(HelpAction::Close),

            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) => {
                self.scroll = 0;
                None
            }
            (KeyCode::Char('G'), _) => {
                self.scroll = self.max_scroll();
                None
            }
            _ => None,
        }
    }

    /// Render the help view.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.highlight));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.visible_height = inner.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let paragraph = Paragraph::new(Self::content_lines(theme)).scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, inner);

        if Self::total_lines() > self.visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));
            let mut state = ScrollbarState::new(self.max_scroll()).position(self.scroll);
            frame.render_stateful_widget(scrollbar, inner, &mut state);
        }
    }

    fn content_lines(theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (section, bindings) in SECTIONS {
            lines.push(Line::from(Span::styled(
                format!("── {} ──", section),
                theme.header_style(),
            )));
            lines.push(Line::from(""));
            for (key, description) in bindings.iter() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>16}", key),
                        Style::default()
                            .fg(theme.highlight)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::raw(*description),
                ]));
            }
            lines.push(Line::from(""));
        }

        let logs = logging::log_directory()
            .map(|dir| format!("Logs: {}", dir.display()))
            .unwrap_or_else(|| "Logs: unavailable".to_string());
        lines.push(Line::styled(logs, Style::default().fg(theme.dim)));
        lines.push(Line::styled(
            "Press ?, q, or Esc to close",
            Style::default().fg(theme.dim),
        ));
        lines
    }
}
