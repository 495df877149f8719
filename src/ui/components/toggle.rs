//! On/off toggle wrapped around a host widget.

use super::button::{WidgetHandle, OFF_OPACITY, ON_OPACITY};

/// Message emitted when a toggle changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// The toggle is now in the given state.
    Changed(bool),
}

/// A two-state toggle that reflects its state through the widget's opacity.
///
/// Starts off. Setting the state it already has emits nothing.
#[derive(Debug, Clone)]
pub struct ToggleButton<H: WidgetHandle> {
    handle: H,
    on: bool,
}

impl<H: WidgetHandle> ToggleButton<H> {
    /// Wrap a widget. The toggle starts off.
    pub fn new(mut handle: H) -> Self {
        handle.set_opacity(OFF_OPACITY);
        Self { handle, on: false }
    }

    /// Check if the toggle is on.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// The wrapped widget.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Flip the state.
    pub fn click(&mut self) -> Option<ToggleAction> {
        self.set_state(!self.on)
    }

    /// Set the state. Returns a change message only if the state changed.
    pub fn set_state(&mut self, on: bool) -> Option<ToggleAction> {
        if self.on == on {
            return None;
        }
        self.on = on;
        self.handle
            .set_opacity(if on { ON_OPACITY } else { OFF_OPACITY });
        Some(ToggleAction::Changed(on))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::Button;

    fn toggle() -> ToggleButton<Button> {
        ToggleButton::new(Button::new("Types", 't'))
    }

    #[test]
    fn test_starts_off_and_dimmed() {
        let toggle = toggle();
        assert!(!toggle.is_on());
        assert_eq!(toggle.handle().opacity(), OFF_OPACITY);
    }

    #[test]
    fn test_click_parity() {
        let mut toggle = toggle();
        for clicks in 1..=6 {
            let action = toggle.click();
            assert_eq!(action, Some(ToggleAction::Changed(clicks % 2 == 1)));
            assert_eq!(toggle.is_on(), clicks % 2 == 1);
        }
    }

    #[test]
    fn test_opacity_follows_state() {
        let mut toggle = toggle();
        toggle.click();
        assert_eq!(toggle.handle().opacity(), ON_OPACITY);
        toggle.click();
        assert_eq!(toggle.handle().opacity(), OFF_OPACITY);
    }

    #[test]
    fn test_redundant_set_state_emits_nothing() {
        let mut toggle = toggle();
        assert_eq!(toggle.set_state(false), None);
        assert_eq!(toggle.set_state(true), Some(ToggleAction::Changed(true)));
        assert_eq!(toggle.set_state(true), None);
        assert!(toggle.is_on());
    }
}
