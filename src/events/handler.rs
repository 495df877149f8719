//! Terminal event polling.
//!
//! Reads crossterm events and turns them into [`Event`]s for the app.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};

use super::Event;
use crate::config::{Settings, DEFAULT_TICK_RATE_MS};

/// Polls crossterm, producing a tick whenever the terminal stays quiet.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a handler ticking at the built-in `tick_rate_ms` default.
    ///
    /// The running editor builds its handler with [`EventHandler::from_settings`].
    pub fn new() -> Self {
        Self::with_tick_rate(DEFAULT_TICK_RATE_MS)
    }

    /// Create a handler ticking every `tick_rate_ms` milliseconds.
    pub fn with_tick_rate(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Create a handler ticking at the configured `tick_rate_ms`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_tick_rate(settings.tick_rate_ms)
    }

    /// How long [`EventHandler::next`] waits before reporting a tick.
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Wait up to one tick for the next event.
    pub fn next(&self) -> std::io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }

        let event = match event::read()? {
            // Windows also reports releases; only presses count
            CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                Event::Key(key_event)
            }
            CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
            _ => Event::Tick,
        };
        Ok(event)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_handler_new() {
        let handler = EventHandler::new();
        assert_eq!(handler.tick_rate(), Duration::from_millis(DEFAULT_TICK_RATE_MS));
    }

    #[test]
    fn test_event_handler_with_tick_rate() {
        let handler = EventHandler::with_tick_rate(50);
        assert_eq!(handler.tick_rate(), Duration::from_millis(50));
    }

    #[test]
    fn test_event_handler_from_settings() {
        let settings = Settings {
            tick_rate_ms: 250,
            ..Settings::default()
        };
        let handler = EventHandler::from_settings(&settings);
        assert_eq!(handler.tick_rate(), Duration::from_millis(250));
    }

    #[test]
    fn test_event_handler_default() {
        let handler = EventHandler::default();
        assert_eq!(handler.tick_rate(), EventHandler::new().tick_rate());
    }
}
