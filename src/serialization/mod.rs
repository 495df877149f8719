//! String serialization of cell values.
//!
//! The serializer is deliberately thin: values are written with their
//! `Display` form and read back with `FromStr` or through a
//! [`ConversionRegistry`] when only the runtime type is known.

mod registry;

use std::any::type_name;
use std::fmt::Display;
use std::str::FromStr;

pub use registry::{ConversionError, ConversionRegistry, Converter};

use crate::model::{CellValue, ValueType};

/// Converts values to strings and back.
pub trait Serializer {
    /// Write a value as a string.
    fn serialize<T: Display + ?Sized>(&self, value: &T) -> String;

    /// Read a value of a statically known type.
    fn deserialize<T: FromStr>(&self, data: &str) -> Result<T, ConversionError>;

    /// Read a value of a type known only at runtime.
    fn deserialize_value(&self, data: &str, ty: ValueType) -> Result<CellValue, ConversionError>;
}

/// The default serializer: `Display` out, `FromStr` / registry in.
#[derive(Debug, Clone)]
pub struct StringSerializer {
    registry: ConversionRegistry,
}

impl StringSerializer {
    /// Create a serializer with the built-in converters.
    pub fn new() -> Self {
        Self::with_registry(ConversionRegistry::with_defaults())
    }

    /// Create a serializer backed by a custom registry.
    pub fn with_registry(registry: ConversionRegistry) -> Self {
        Self { registry }
    }

    /// The conversion registry.
    pub fn registry(&self) -> &ConversionRegistry {
        &self.registry
    }

    /// Mutable access to the conversion registry.
    pub fn registry_mut(&mut self) -> &mut ConversionRegistry {
        &mut self.registry
    }
}

impl Default for StringSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for StringSerializer {
    fn serialize<T: Display + ?Sized>(&self, value: &T) -> String {
        value.to_string()
    }

    fn deserialize<T: FromStr>(&self, data: &str) -> Result<T, ConversionError> {
        data.parse::<T>()
            .map_err(|_| ConversionError::invalid(data, short_type_name::<T>()))
    }

    fn deserialize_value(&self, data: &str, ty: ValueType) -> Result<CellValue, ConversionError> {
        self.registry.convert(data, ty)
    }
}

/// `alloc::string::String` -> `String`.
fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
