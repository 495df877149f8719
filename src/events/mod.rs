//! Event handling for the application.
//!
//! Terminal input is polled by the [`EventHandler`] and turned into
//! [`Event`]s that drive `App::update`.

mod handler;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;

/// An input to the application's update loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized to (width, height).
    Resize(u16, u16),
    /// No input arrived within the tick rate.
    Tick,
    /// The application should exit.
    Quit,
}
