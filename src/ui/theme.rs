//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Highlight color for the cursor cell and active widgets.
    pub highlight: Color,
    /// Column header color.
    pub header: Color,
    /// Color of nested list and sub-item cells.
    pub nested: Color,
    /// Color of null cells and secondary text.
    pub dim: Color,
    /// Background of selected rows.
    pub selected: Color,
    /// Color of error messages.
    pub error: Color,
}

impl Theme {
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header)
            .add_modifier(Modifier::BOLD)
    }

    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default().bg(self.selected)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            highlight: Color::Cyan,
            header: Color::Yellow,
            nested: Color::Magenta,
            dim: Color::DarkGray,
            selected: Color::Rgb(40, 40, 80),
            error: Color::Red,
        }
    }
}
