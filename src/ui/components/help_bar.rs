//! Key hint bar shown at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::Theme;

/// Render a hint line such as `[Enter] edit  [Esc] up`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &str, theme: &Theme) {
    let line = Line::from(hint_spans(hints, theme));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split hint text into spans, styling bracketed keys apart from their descriptions.
fn hint_spans(hints: &str, theme: &Theme) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(theme.highlight);
    let text_style = Style::default().fg(theme.dim);

    let mut spans = Vec::new();
    let mut rest = hints;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), text_style));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key_style));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }
    spans
}
