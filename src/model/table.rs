//! Tables and rows.

use std::fmt;

use serde_json::{Map, Value};

use super::cell::Cell;
use super::schema::{Column, FieldKind, Schema};
use super::value::{json_kind, ValueType};
use super::{ModelError, Result};

/// Stable identifier of a row within its table.
///
/// Ids are never reused within a table, so they survive removals and
/// reordering where positions do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    /// Wrap a raw id.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One row of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Stable identifier.
    pub id: RowId,
    /// Current 0-based index in the table.
    pub position: usize,
    /// One cell per visible column.
    pub cells: Vec<Cell>,
    /// Ignored and unknown fields, kept verbatim for saving.
    hidden: Map<String, Value>,
}

impl Row {
    /// Fields that are not shown as columns.
    pub fn hidden_fields(&self) -> &Map<String, Value> {
        &self.hidden
    }
}

/// An ordered collection of rows sharing one schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    schema: Schema,
    columns: Vec<Column>,
    rows: Vec<Row>,
    next_id: u64,
}

impl TableData {
    /// Create an empty table.
    pub fn new(schema: Schema) -> Self {
        let columns = schema.columns();
        Self {
            schema,
            columns,
            rows: Vec::new(),
            next_id: 0,
        }
    }

    /// Create a table from JSON rows.
    pub fn from_json(schema: Schema, values: &[Value]) -> Result<Self> {
        let mut table = Self::new(schema);
        for value in values {
            table.push_json_row(value)?;
        }
        Ok(table)
    }

    /// The row schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The visible columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// All rows in position order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find a row by id.
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Find a row by id, mutably.
    pub fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    /// The row at a position.
    pub fn row_at(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    /// The last row.
    pub fn last_row(&self) -> Option<&Row> {
        self.rows.last()
    }

    /// Append a row of default cells and return its id.
    pub fn push_default_row(&mut self) -> RowId {
        let cells = self.columns.iter().map(|c| Cell::default_for(&c.kind)).collect();
        self.push_row(cells, Map::new())
    }

    /// Append a row read from JSON and return its id.
    ///
    /// For object schemas, keys that are ignored or not in the schema are
    /// stored in the row's hidden fields.
    pub fn push_json_row(&mut self, value: &Value) -> Result<RowId> {
        let (cells, hidden) = match &self.schema {
            Schema::Scalar(_) | Schema::List(_) => {
                let kind = self
                    .schema
                    .element_kind()
                    .unwrap_or(FieldKind::Value(ValueType::Text));
                (vec![Cell::from_json(&kind, value)?], Map::new())
            }
            Schema::Object(fields) => {
                let object = value.as_object().ok_or_else(|| ModelError::TypeMismatch {
                    expected: "object".to_string(),
                    found: json_kind(value).to_string(),
                })?;

                let mut cells = Vec::with_capacity(self.columns.len());
                for field in fields.iter().filter(|f| !f.ignore) {
                    let raw = object.get(&field.name).unwrap_or(&Value::Null);
                    cells.push(Cell::from_json(&field.kind, raw)?);
                }

                let hidden = object
                    .iter()
                    .filter(|(key, _)| {
                        fields.iter().all(|f| f.name != **key || f.ignore)
                    })
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                (cells, hidden)
            }
        };
        Ok(self.push_row(cells, hidden))
    }

    fn push_row(&mut self, cells: Vec<Cell>, hidden: Map<String, Value>) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(Row {
            id,
            position: self.rows.len(),
            cells,
            hidden,
        });
        id
    }

    /// Remove a row by id and renumber the positions of the rows after it.
    pub fn remove_row(&mut self, id: RowId) -> Result<Row> {
        let index = self
            .rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(ModelError::RowNotFound(id))?;
        let removed = self.rows.remove(index);
        for (position, row) in self.rows.iter_mut().enumerate().skip(index) {
            row.position = position;
        }
        Ok(removed)
    }

    /// The cell at a row id and column index.
    pub fn cell(&self, id: RowId, column: usize) -> Result<&Cell> {
        self.row(id)
            .ok_or(ModelError::RowNotFound(id))?
            .cells
            .get(column)
            .ok_or(ModelError::ColumnOutOfRange(column))
    }

    /// Mutable access to the cell at a row id and column index.
    pub fn cell_mut(&mut self, id: RowId, column: usize) -> Result<&mut Cell> {
        self.row_mut(id)
            .ok_or(ModelError::RowNotFound(id))?
            .cells
            .get_mut(column)
            .ok_or(ModelError::ColumnOutOfRange(column))
    }

    /// Convert every row back to JSON.
    pub fn to_json(&self) -> Vec<Value> {
        self.rows.iter().map(|row| self.row_to_json(row)).collect()
    }

    fn row_to_json(&self, row: &Row) -> Value {
        match &self.schema {
            Schema::Scalar(_) | Schema::List(_) => row.cells.first().map(Cell::to_json).unwrap_or(Value::Null),
            Schema::Object(fields) => {
                let mut object = row.hidden.clone();
                let visible = fields.iter().filter(|f| !f.ignore);
                for (field, cell) in visible.zip(&row.cells) {
                    object.insert(field.name.clone(), cell.to_json());
                }
                Value::Object(object)
            }
        }
    }
}
