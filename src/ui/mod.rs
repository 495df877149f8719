//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the grid and help views,
//! and the buttons and editor they are built from.

pub mod components;
pub mod theme;
mod views;

pub use components::{
    render_hints, AddRowButton, Button, CellEditor, DeleteRowButton, EditorAction, RowAction,
    ToggleAction, ToggleButton, WidgetHandle,
};
pub use theme::Theme;
pub use views::{GridView, HelpAction, HelpView};
