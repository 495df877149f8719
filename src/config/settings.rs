//! Application settings configuration.

use serde::{Deserialize, Serialize};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Default event loop tick rate in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rows shown per page of the grid.
    pub page_size: usize,
    /// Whether column headers show their value types on startup.
    pub show_column_types: bool,
    /// Field names hidden from the grid at any depth.
    pub ignored_fields: Vec<String>,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            show_column_types: false,
            ignored_fields: Vec::new(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}
