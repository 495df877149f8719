//! Grid cells.
//!
//! A [`Cell`] is either a plain value or one of the two table-owning
//! variants: a list (one sub-table row per element) or an optional nested
//! object (a one-row sub-table when present, nothing when null).

use serde_json::Value;

use super::schema::{FieldKind, Schema};
use super::table::{RowId, TableData};
use super::value::{json_kind, CellValue, ValueType};
use super::{ModelError, Result};

/// A single addressable unit of the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A scalar value.
    Value(ValueCell),
    /// A list of elements backed by a sub-table.
    List(ListCell),
    /// An optional nested object backed by a one-row sub-table.
    SubItem(SubItemCell),
}

/// A cell holding a scalar of a declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCell {
    ty: ValueType,
    value: CellValue,
}

impl ValueCell {
    /// Create a cell holding the type's default value.
    pub fn new(ty: ValueType) -> Self {
        Self {
            ty,
            value: ty.default_value(),
        }
    }

    /// The declared type.
    pub fn value_type(&self) -> ValueType {
        self.ty
    }

    /// The current value.
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    /// Replace the value. Null is always accepted.
    pub fn set_value(&mut self, value: CellValue) -> Result<()> {
        match value.value_type() {
            Some(ty) if ty != self.ty => Err(ModelError::TypeMismatch {
                expected: self.ty.name().to_string(),
                found: ty.name().to_string(),
            }),
            _ => {
                self.value = value;
                Ok(())
            }
        }
    }
}

/// A cell holding a list. `items` is `None` when the list itself is null.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCell {
    element: Schema,
    items: Option<TableData>,
}

impl ListCell {
    /// Create a null list with the given element schema.
    pub fn null(element: Schema) -> Self {
        Self {
            element,
            items: None,
        }
    }

    /// Create an empty, non-null list.
    pub fn empty(element: Schema) -> Self {
        let items = TableData::new(element.clone());
        Self {
            element,
            items: Some(items),
        }
    }

    /// Build a list from JSON array elements.
    pub fn from_elements(element: Schema, values: &[Value]) -> Result<Self> {
        let items = TableData::from_json(element.clone(), values)?;
        Ok(Self {
            element,
            items: Some(items),
        })
    }

    /// The element schema.
    pub fn element_schema(&self) -> &Schema {
        &self.element
    }

    /// Check if the list is null.
    pub fn is_null(&self) -> bool {
        self.items.is_none()
    }

    /// Number of elements. Zero for a null list.
    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, TableData::len)
    }

    /// Check if the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sub-table of elements, if the list is not null.
    pub fn sub_table(&self) -> Option<&TableData> {
        self.items.as_ref()
    }

    /// Mutable access to the sub-table of elements.
    pub fn sub_table_mut(&mut self) -> Option<&mut TableData> {
        self.items.as_mut()
    }

    /// Append a default element, creating the list first if it is null.
    pub fn add_empty_item(&mut self) -> RowId {
        let element = &self.element;
        self.items
            .get_or_insert_with(|| TableData::new(element.clone()))
            .push_default_row()
    }

    /// Remove the element with the given row id.
    pub fn remove_item(&mut self, id: RowId) -> Result<()> {
        let items = self.items.as_mut().ok_or(ModelError::NullTable)?;
        items.remove_row(id).map(|_| ())
    }
}

/// A cell holding an optional nested object.
#[derive(Debug, Clone, PartialEq)]
pub struct SubItemCell {
    schema: Schema,
    value: Option<TableData>,
}

impl SubItemCell {
    /// Create a null sub-item.
    pub fn null(schema: Schema) -> Self {
        Self {
            schema,
            value: None,
        }
    }

    /// Build a sub-item from a JSON object.
    pub fn from_object(schema: Schema, object: &Value) -> Result<Self> {
        let table = TableData::from_json(schema.clone(), std::slice::from_ref(object))?;
        Ok(Self {
            schema,
            value: Some(table),
        })
    }

    /// The object schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Check if the object is null.
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// The one-row sub-table, if the object is not null.
    pub fn sub_table(&self) -> Option<&TableData> {
        self.value.as_ref()
    }

    /// Mutable access to the one-row sub-table.
    pub fn sub_table_mut(&mut self) -> Option<&mut TableData> {
        self.value.as_mut()
    }

    /// Materialize a default instance if the object is null.
    ///
    /// Returns `true` if a value was created.
    pub fn create_default_value(&mut self) -> bool {
        if self.value.is_some() {
            return false;
        }
        let mut table = TableData::new(self.schema.clone());
        table.push_default_row();
        self.value = Some(table);
        true
    }

    /// Set the object back to null.
    pub fn clear(&mut self) {
        self.value = None;
    }
}

impl Cell {
    /// A freshly created cell for a field of the given kind.
    ///
    /// Values get their type's default; lists and nested objects start null.
    pub fn default_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Value(ty) => Cell::Value(ValueCell::new(*ty)),
            FieldKind::List(element) => Cell::List(ListCell::null(element.clone())),
            FieldKind::SubItem(schema) => Cell::SubItem(SubItemCell::null(schema.clone())),
        }
    }

    /// Build a cell for a field of the given kind from JSON.
    pub fn from_json(kind: &FieldKind, value: &Value) -> Result<Self> {
        match (kind, value) {
            (FieldKind::Value(ty), _) => Ok(Cell::Value(ValueCell {
                ty: *ty,
                value: CellValue::from_json(*ty, value)?,
            })),
            (FieldKind::List(element), Value::Null) => Ok(Cell::List(ListCell::null(element.clone()))),
            (FieldKind::List(element), Value::Array(items)) => {
                Ok(Cell::List(ListCell::from_elements(element.clone(), items)?))
            }
            (FieldKind::SubItem(schema), Value::Null) => {
                Ok(Cell::SubItem(SubItemCell::null(schema.clone())))
            }
            (FieldKind::SubItem(schema), Value::Object(_)) => {
                Ok(Cell::SubItem(SubItemCell::from_object(schema.clone(), value)?))
            }
            (FieldKind::List(_), other) => Err(ModelError::TypeMismatch {
                expected: "list".to_string(),
                found: json_kind(other).to_string(),
            }),
            (FieldKind::SubItem(_), other) => Err(ModelError::TypeMismatch {
                expected: "object".to_string(),
                found: json_kind(other).to_string(),
            }),
        }
    }

    /// Convert back to JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Cell::Value(cell) => cell.value.to_json(),
            Cell::List(list) => match &list.items {
                Some(items) => Value::Array(items.to_json()),
                None => Value::Null,
            },
            Cell::SubItem(item) => item
                .value
                .as_ref()
                .and_then(|table| table.to_json().into_iter().next())
                .unwrap_or(Value::Null),
        }
    }

    /// The sub-table this cell owns, if any and not null.
    pub fn sub_table(&self) -> Option<&TableData> {
        match self {
            Cell::Value(_) => None,
            Cell::List(list) => list.sub_table(),
            Cell::SubItem(item) => item.sub_table(),
        }
    }

    /// Mutable access to the sub-table this cell owns.
    pub fn sub_table_mut(&mut self) -> Option<&mut TableData> {
        match self {
            Cell::Value(_) => None,
            Cell::List(list) => list.sub_table_mut(),
            Cell::SubItem(item) => item.sub_table_mut(),
        }
    }

    /// Check if this cell can own a table (list or sub-item), null or not.
    pub fn is_table_backed(&self) -> bool {
        !matches!(self, Cell::Value(_))
    }

    /// Text shown for this cell in the grid.
    pub fn summary(&self) -> String {
        match self {
            Cell::Value(cell) if cell.value.is_null() => "null".to_string(),
            Cell::Value(cell) => cell.value.to_string(),
            Cell::List(list) if list.is_null() => "null".to_string(),
            Cell::List(list) => format!("[{} items]", list.len()),
            Cell::SubItem(item) if item.is_null() => "null".to_string(),
            Cell::SubItem(_) => "{...}".to_string(),
        }
    }
}
