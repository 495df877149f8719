//! Reusable UI components.

mod button;
mod cell_editor;
mod help_bar;
mod row_buttons;
mod toggle;

pub use button::{Button, WidgetHandle, OFF_OPACITY, ON_OPACITY};
pub use cell_editor::{CellEditor, EditorAction};
pub use help_bar::render_hints;
pub use row_buttons::{AddRowButton, DeleteRowButton, RowAction};
pub use toggle::{ToggleAction, ToggleButton};
