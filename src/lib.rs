//! TableForge - a terminal spreadsheet editor for nested JSON collections.
//!
//! A document is a JSON array or object. Its records are shown as rows,
//! their fields as columns; list and object fields open as nested tables.

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod events;
pub mod logging;
pub mod model;
pub mod serialization;
pub mod strategy;
pub mod terminal;
pub mod ui;
