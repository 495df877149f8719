//! Application views (screens).

mod grid;
mod help;

pub use grid::GridView;
pub use help::{HelpAction, HelpView};
