//! Toolbar button widget.
//!
//! Terminals have no alpha channel, so opacity is approximated: a fully
//! opaque button is drawn bold in the accent color, anything less is dimmed.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// A host widget whose visual opacity can be changed.
pub trait WidgetHandle {
    /// Set the opacity, from 0.0 (invisible) to 1.0 (opaque).
    fn set_opacity(&mut self, opacity: f32);

    /// The current opacity.
    fn opacity(&self) -> f32;
}

/// Opacity of an active button.
pub const ON_OPACITY: f32 = 1.0;

/// Opacity of an inactive button.
pub const OFF_OPACITY: f32 = 0.5;

/// A labelled toolbar button with a hotkey.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    label: String,
    hotkey: char,
    opacity: f32,
}

impl Button {
    /// Create a fully opaque button.
    pub fn new(label: impl Into<String>, hotkey: char) -> Self {
        Self {
            label: label.into(),
            hotkey,
            opacity: ON_OPACITY,
        }
    }

    /// The button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The key that presses this button.
    pub fn hotkey(&self) -> char {
        self.hotkey
    }

    /// Style derived from the current opacity.
    pub fn style(&self) -> Style {
        if self.opacity >= ON_OPACITY {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        }
    }

    /// The button as spans, e.g. `[a] Add row`.
    pub fn spans(&self) -> Vec<Span<'static>> {
        vec![
            Span::styled(format!("[{}]", self.hotkey), self.style()),
            Span::styled(format!(" {}", self.label), self.style()),
        ]
    }

    /// Render the button on its own.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(Line::from(self.spans())), area);
    }
}

impl WidgetHandle for Button {
    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_opaque() {
        let button = Button::new("Add row", 'a');
        assert_eq!(button.opacity(), ON_OPACITY);
        assert_eq!(button.hotkey(), 'a');
        assert!(button.style().add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_dimmed_when_translucent() {
        let mut button = Button::new("Add row", 'a');
        button.set_opacity(OFF_OPACITY);
        assert!(button.style().add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_opacity_is_clamped() {
        let mut button = Button::new("x", 'x');
        button.set_opacity(3.0);
        assert_eq!(button.opacity(), 1.0);
        button.set_opacity(-1.0);
        assert_eq!(button.opacity(), 0.0);
    }

    #[test]
    fn test_spans() {
        let button = Button::new("Save", 's');
        let text: String = button.spans().iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[s] Save");
    }
}
