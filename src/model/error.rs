//! Error types for the table model.

use thiserror::Error;

use super::RowId;
use crate::serialization::ConversionError;

/// Errors that can occur while reading or mutating tables.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// A value did not match the declared type of its cell.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The declared type.
        expected: String,
        /// What was supplied instead.
        found: String,
    },

    /// No row with this id exists in the table.
    #[error("Row {0} not found")]
    RowNotFound(RowId),

    /// The column index is past the last column.
    #[error("Column {0} out of range")]
    ColumnOutOfRange(usize),

    /// The cell is a plain value and does not own a table.
    #[error("Cell does not contain a table")]
    NotATable,

    /// The cell owns a table and cannot hold a scalar.
    #[error("Cell does not contain a value")]
    NotAValue,

    /// The cell owns a table but is currently null.
    #[error("Table is null")]
    NullTable,

    /// Text could not be converted to the cell's type.
    #[error("{0}")]
    Conversion(#[from] ConversionError),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
