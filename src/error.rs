//! Centralized error types for TableForge.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::config::ConfigError;
use crate::model::{DocumentError, ModelError};
use crate::serialization::ConversionError;

/// The main application error type.
///
/// This enum aggregates all error types that can occur in TableForge,
/// providing user-friendly error messages while preserving the underlying
/// error context for debugging.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Document loading or saving errors.
    #[error("{0}")]
    Document(#[from] DocumentError),

    /// Table model errors.
    #[error("{0}")]
    Model(#[from] ModelError),

    /// Text-to-value conversion errors.
    #[error("{0}")]
    Conversion(#[from] ConversionError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display in the status line.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(ConfigError::ValidationError(msg)) => {
                format!("Configuration error: {}", msg)
            }
            AppError::Config(ConfigError::ParseError(_)) => {
                "Configuration file is invalid. Please check the file format.".to_string()
            }
            AppError::Config(_) => {
                "Could not access the configuration file. Check file permissions.".to_string()
            }
            AppError::Document(DocumentError::Io { path, .. }) => {
                format!("Could not access '{}'.", path.display())
            }
            AppError::Document(DocumentError::Json(_)) => {
                "The file is not valid JSON.".to_string()
            }
            AppError::Document(e) => e.to_string(),
            AppError::Model(ModelError::TypeMismatch { expected, .. }) => {
                format!("This cell only accepts {} values.", expected)
            }
            AppError::Model(ModelError::NotATable) => {
                "This cell has no nested table.".to_string()
            }
            AppError::Model(ModelError::NotAValue) => {
                "Open this cell with Enter to edit its contents.".to_string()
            }
            AppError::Model(e) => e.to_string(),
            AppError::Conversion(e) => e.to_string(),
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Check if the user can keep editing after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Model(_) | AppError::Conversion(_) | AppError::Document(DocumentError::Io { .. })
        )
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
