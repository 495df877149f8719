//! The table model.
//!
//! This module contains the data side of the grid:
//! - Scalar values and their types
//! - Schemas, including ignored fields
//! - The `Cell` sum type and the tables nested cells own
//! - JSON documents loaded into a root cell

mod cell;
mod document;
mod error;
mod schema;
mod table;
mod value;

pub use cell::{Cell, ListCell, SubItemCell, ValueCell};
pub use document::{Document, DocumentError};
pub use error::{ModelError, Result};
pub use schema::{Column, FieldKind, FieldSchema, Schema, SCALAR_COLUMN};
pub use table::{Row, RowId, TableData};
pub use value::{CellValue, ValueType};
