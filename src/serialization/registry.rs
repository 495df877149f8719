//! Text-to-value conversion keyed by target type.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::model::{CellValue, ValueType};

/// Errors produced when converting text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The text is not a valid value of the target type.
    #[error("Cannot convert '{input}' to {target}")]
    Invalid {
        /// The text that failed to convert.
        input: String,
        /// Name of the target type.
        target: String,
    },

    /// No converter is registered for the target type.
    #[error("No converter registered for {0}")]
    Unsupported(ValueType),
}

impl ConversionError {
    /// Create an `Invalid` error.
    pub fn invalid(input: impl Into<String>, target: impl Into<String>) -> Self {
        ConversionError::Invalid {
            input: input.into(),
            target: target.into(),
        }
    }
}

/// A conversion from text to a cell value.
pub type Converter = fn(&str) -> Result<CellValue, ConversionError>;

/// A table of converters, one per value type.
#[derive(Clone, Default)]
pub struct ConversionRegistry {
    converters: HashMap<ValueType, Converter>,
}

impl fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.converters.keys()).finish()
    }
}

impl ConversionRegistry {
    /// Create a registry with no converters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in converters for every value type.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ValueType::Bool, parse_bool);
        registry.register(ValueType::Int, parse_int);
        registry.register(ValueType::Float, parse_float);
        registry.register(ValueType::Text, parse_text);
        registry
    }

    /// Register (or replace) the converter for a type.
    pub fn register(&mut self, ty: ValueType, converter: Converter) {
        self.converters.insert(ty, converter);
    }

    /// Check if a converter exists for a type.
    pub fn supports(&self, ty: ValueType) -> bool {
        self.converters.contains_key(&ty)
    }

    /// Convert text to a value of the given type.
    pub fn convert(&self, input: &str, ty: ValueType) -> Result<CellValue, ConversionError> {
        let converter = self
            .converters
            .get(&ty)
            .ok_or(ConversionError::Unsupported(ty))?;
        converter(input)
    }
}

fn parse_bool(input: &str) -> Result<CellValue, ConversionError> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(CellValue::Bool(true))
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(CellValue::Bool(false))
    } else {
        Err(ConversionError::invalid(input, ValueType::Bool.name()))
    }
}

fn parse_int(input: &str) -> Result<CellValue, ConversionError> {
    input
        .trim()
        .parse::<i64>()
        .map(CellValue::Int)
        .map_err(|_| ConversionError::invalid(input, ValueType::Int.name()))
}

fn parse_float(input: &str) -> Result<CellValue, ConversionError> {
    input
        .trim()
        .parse::<f64>()
        .map(CellValue::Float)
        .map_err(|_| ConversionError::invalid(input, ValueType::Float.name()))
}

fn parse_text(input: &str) -> Result<CellValue, ConversionError> {
    Ok(CellValue::Text(input.to_string()))
}
