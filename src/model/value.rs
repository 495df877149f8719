//! Scalar cell values and their declared types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ModelError, Result};

/// The declared type of a scalar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `true` / `false`.
    Bool,
    /// A signed 64-bit integer.
    Int,
    /// A 64-bit float.
    Float,
    /// Free text.
    Text,
}

impl ValueType {
    /// Short name used in column headers and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Text => "text",
        }
    }

    /// The value a freshly created cell of this type holds.
    pub fn default_value(&self) -> CellValue {
        match self {
            ValueType::Bool => CellValue::Bool(false),
            ValueType::Int => CellValue::Int(0),
            ValueType::Float => CellValue::Float(0.0),
            ValueType::Text => CellValue::Text(String::new()),
        }
    }

    /// Classify a JSON scalar.
    ///
    /// Returns `None` for null, arrays, objects and integers outside the
    /// `i64` range.
    pub fn of_json(value: &Value) -> Option<ValueType> {
        match value {
            Value::Bool(_) => Some(ValueType::Bool),
            Value::Number(n) if n.is_i64() => Some(ValueType::Int),
            Value::Number(n) if n.is_f64() => Some(ValueType::Float),
            Value::String(_) => Some(ValueType::Text),
            Value::Number(_) | Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// The narrowest type that can hold values of both `self` and `other`.
    pub fn unify(self, other: ValueType) -> ValueType {
        match (self, other) {
            (a, b) if a == b => a,
            (ValueType::Int, ValueType::Float) | (ValueType::Float, ValueType::Int) => {
                ValueType::Float
            }
            _ => ValueType::Text,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar value stored in a [`ValueCell`](super::ValueCell).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// Text.
    Text(String),
    /// JSON the column type cannot hold exactly, kept as loaded.
    Raw(Value),
}

impl CellValue {
    /// The type of this value, or `None` for null and raw values.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            CellValue::Null | CellValue::Raw(_) => None,
            CellValue::Bool(_) => Some(ValueType::Bool),
            CellValue::Int(_) => Some(ValueType::Int),
            CellValue::Float(_) => Some(ValueType::Float),
            CellValue::Text(_) => Some(ValueType::Text),
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Read a JSON scalar as a value of type `ty`.
    ///
    /// Integers in a float column and non-string values in a text column
    /// are kept as [`CellValue::Raw`] so they save exactly as they were
    /// loaded. Everything else that does not fit is a mismatch.
    pub fn from_json(ty: ValueType, value: &Value) -> Result<Self> {
        let converted = match (ty, value) {
            (_, Value::Null) => Some(CellValue::Null),
            (ValueType::Bool, Value::Bool(b)) => Some(CellValue::Bool(*b)),
            (ValueType::Int, Value::Number(n)) => n.as_i64().map(CellValue::Int),
            (ValueType::Float, Value::Number(n)) if n.is_f64() => n.as_f64().map(CellValue::Float),
            (ValueType::Float, Value::Number(_)) => Some(CellValue::Raw(value.clone())),
            (ValueType::Text, Value::String(s)) => Some(CellValue::Text(s.clone())),
            (ValueType::Text, other) => Some(CellValue::Raw(other.clone())),
            _ => None,
        };

        converted.ok_or_else(|| ModelError::TypeMismatch {
            expected: ty.name().to_string(),
            found: json_kind(value).to_string(),
        })
    }

    /// Convert back to JSON. Non-finite floats become null.
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Int(i) => Value::from(*i),
            CellValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Raw(v) => v.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Raw(v) => write!(f, "{}", v),
        }
    }
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "text",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
