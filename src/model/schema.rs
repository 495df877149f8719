//! Table schemas and schema inference.
//!
//! A schema describes the shape of one table row: a bare scalar (lists of
//! numbers, lists of strings), a nested list (lists of lists) or an object
//! with named fields.
//! Fields can be marked as ignored, in which case they never become grid
//! columns but are carried through load/save untouched.

use serde_json::Value;

use super::value::ValueType;

/// Column name used for scalar schemas.
pub const SCALAR_COLUMN: &str = "value";

/// The shape of one row of a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Each row is a single scalar value.
    Scalar(ValueType),
    /// Each row is itself a list whose elements follow the inner schema.
    List(Box<Schema>),
    /// Each row is an object with the given fields.
    Object(Vec<FieldSchema>),
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A scalar value.
    Value(ValueType),
    /// A list whose elements follow the given schema.
    List(Schema),
    /// An optional nested object.
    SubItem(Schema),
}

/// A named field of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// The field name (JSON key).
    pub name: String,
    /// What the field holds.
    pub kind: FieldKind,
    /// Excluded from the grid when set.
    pub ignore: bool,
}

impl FieldSchema {
    /// Create a visible field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ignore: false,
        }
    }

    /// Mark this field as ignored.
    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }
}

/// A visible column of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Header text.
    pub name: String,
    /// What the cells of this column hold.
    pub kind: FieldKind,
}

impl Column {
    /// Short type label for the column header.
    pub fn type_label(&self) -> String {
        match &self.kind {
            FieldKind::Value(ty) => ty.name().to_string(),
            FieldKind::List(_) => "list".to_string(),
            FieldKind::SubItem(_) => "object".to_string(),
        }
    }
}

impl Schema {
    /// The visible columns, in field order.
    pub fn columns(&self) -> Vec<Column> {
        match self {
            Schema::Scalar(_) | Schema::List(_) => vec![Column {
                name: SCALAR_COLUMN.to_string(),
                kind: self.element_kind().unwrap_or(FieldKind::Value(ValueType::Text)),
            }],
            Schema::Object(fields) => fields
                .iter()
                .filter(|f| !f.ignore)
                .map(|f| Column {
                    name: f.name.clone(),
                    kind: f.kind.clone(),
                })
                .collect(),
        }
    }

    /// All fields, ignored ones included. Empty for single-column schemas.
    pub fn fields(&self) -> &[FieldSchema] {
        match self {
            Schema::Scalar(_) | Schema::List(_) => &[],
            Schema::Object(fields) => fields,
        }
    }

    /// The kind of the single cell of a scalar or nested-list row.
    /// `None` for object schemas.
    pub fn element_kind(&self) -> Option<FieldKind> {
        match self {
            Schema::Scalar(ty) => Some(FieldKind::Value(*ty)),
            Schema::List(inner) => Some(FieldKind::List((**inner).clone())),
            Schema::Object(_) => None,
        }
    }

    /// Check whether a key is a declared field of this schema.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields().iter().any(|f| f.name == name)
    }

    /// Infer a schema from sample rows.
    ///
    /// If every non-null sample is an object, the result is an object schema
    /// whose fields appear in first-seen order. If every one is an array, the
    /// rows are nested lists. Otherwise the samples are treated as scalars
    /// and their types unified; mixed shapes give `Scalar(Text)`, whose cells
    /// keep non-string values verbatim. No samples (or only nulls) gives
    /// `Scalar(Text)`.
    pub fn infer<'a>(samples: impl IntoIterator<Item = &'a Value>) -> Schema {
        let samples: Vec<&Value> = samples.into_iter().filter(|v| !v.is_null()).collect();

        if !samples.is_empty() && samples.iter().all(|v| v.is_object()) {
            return Schema::Object(infer_fields(&samples));
        }
        if !samples.is_empty() && samples.iter().all(|v| v.is_array()) {
            return Schema::List(Box::new(Schema::infer(array_elements(&samples))));
        }
        Schema::Scalar(scalar_type(&samples))
    }

    /// Mark every field (at any depth) whose name is in `names` as ignored.
    pub fn with_ignored(self, names: &[String]) -> Schema {
        if names.is_empty() {
            return self;
        }
        match self {
            Schema::Scalar(ty) => Schema::Scalar(ty),
            Schema::List(inner) => Schema::List(Box::new(inner.with_ignored(names))),
            Schema::Object(fields) => Schema::Object(
                fields
                    .into_iter()
                    .map(|mut field| {
                        if names.iter().any(|n| *n == field.name) {
                            field.ignore = true;
                        }
                        field.kind = match field.kind {
                            FieldKind::List(s) => FieldKind::List(s.with_ignored(names)),
                            FieldKind::SubItem(s) => FieldKind::SubItem(s.with_ignored(names)),
                            kind => kind,
                        };
                        field
                    })
                    .collect(),
            ),
        }
    }
}

fn infer_fields(objects: &[&Value]) -> Vec<FieldSchema> {
    let mut names: Vec<&str> = Vec::new();
    for object in objects {
        if let Value::Object(map) = object {
            for key in map.keys() {
                if !names.contains(&key.as_str()) {
                    names.push(key.as_str());
                }
            }
        }
    }

    names
        .into_iter()
        .map(|name| {
            let values: Vec<&Value> = objects
                .iter()
                .filter_map(|o| o.get(name))
                .filter(|v| !v.is_null())
                .collect();
            FieldSchema::new(name, infer_kind(&values))
        })
        .collect()
}

/// Kind of a field from its non-null values. A field mixing lists, objects
/// and scalars becomes a text value whose cells keep their JSON as loaded.
fn infer_kind(values: &[&Value]) -> FieldKind {
    if !values.is_empty() && values.iter().all(|v| v.is_array()) {
        return FieldKind::List(Schema::infer(array_elements(values)));
    }
    if !values.is_empty() && values.iter().all(|v| v.is_object()) {
        return FieldKind::SubItem(Schema::infer(values.iter().copied()));
    }
    FieldKind::Value(scalar_type(values))
}

fn array_elements<'a>(arrays: &[&'a Value]) -> Vec<&'a Value> {
    arrays
        .iter()
        .filter_map(|v| v.as_array())
        .flatten()
        .collect()
}

fn scalar_type(values: &[&Value]) -> ValueType {
    values
        .iter()
        .map(|v| ValueType::of_json(v).unwrap_or(ValueType::Text))
        .reduce(ValueType::unify)
        .unwrap_or(ValueType::Text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_scalar_list() {
        let values = [json!(1), json!(2.5), json!(null)];
        assert_eq!(Schema::infer(&values), Schema::Scalar(ValueType::Float));
    }

    #[test]
    fn test_infer_list_of_lists() {
        let values = [json!([1, 2]), json!(null), json!([3])];
        assert_eq!(
            Schema::infer(&values),
            Schema::List(Box::new(Schema::Scalar(ValueType::Int)))
        );
        let columns = Schema::infer(&values).columns();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].type_label(), "list");
    }

    #[test]
    fn test_infer_mixed_shapes_fall_back_to_text() {
        let values = [json!({"t": [1]}), json!({"t": 5}), json!({"t": {"a": 1}})];
        let schema = Schema::infer(&values);
        assert_eq!(schema.fields()[0].kind, FieldKind::Value(ValueType::Text));

        let values = [json!(1), json!("x"), json!(u64::MAX)];
        assert_eq!(Schema::infer(&values), Schema::Scalar(ValueType::Text));
    }

    #[test]
    fn test_infer_empty_is_text() {
        let values: [Value; 0] = [];
        assert_eq!(Schema::infer(&values), Schema::Scalar(ValueType::Text));
    }

    #[test]
    fn test_infer_object_fields_in_first_seen_order() {
        let values = [
            json!({"name": "sword", "damage": 5}),
            json!({"name": "bow", "range": 30.5}),
        ];
        let schema = Schema::infer(&values);
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        // serde_json keeps object keys sorted unless preserve_order is on
        assert_eq!(names, vec!["damage", "name", "range"]);
        assert_eq!(
            schema.fields()[2].kind,
            FieldKind::Value(ValueType::Float)
        );
    }

    #[test]
    fn test_infer_nested_kinds() {
        let values = [json!({
            "tags": ["a", "b"],
            "owner": {"id": 1},
            "note": null
        })];
        let schema = Schema::infer(&values);
        let kind_of = |name: &str| {
            schema
                .fields()
                .iter()
                .find(|f| f.name == name)
                .map(|f| f.kind.clone())
                .unwrap()
        };

        assert_eq!(kind_of("tags"), FieldKind::List(Schema::Scalar(ValueType::Text)));
        assert!(matches!(kind_of("owner"), FieldKind::SubItem(Schema::Object(_))));
        assert_eq!(kind_of("note"), FieldKind::Value(ValueType::Text));
    }

    #[test]
    fn test_with_ignored_hides_columns_at_any_depth() {
        let values = [json!({"id": 1, "meta": {"id": 2, "x": 3}})];
        let schema = Schema::infer(&values).with_ignored(&["id".to_string()]);

        let columns: Vec<String> = schema.columns().into_iter().map(|c| c.name).collect();
        assert_eq!(columns, vec!["meta"]);
        assert!(schema.has_field("id"));

        match &schema.fields()[1].kind {
            FieldKind::SubItem(inner) => {
                let inner_columns: Vec<String> =
                    inner.columns().into_iter().map(|c| c.name).collect();
                assert_eq!(inner_columns, vec!["x"]);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_scalar_schema_has_single_value_column() {
        let columns = Schema::Scalar(ValueType::Int).columns();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, SCALAR_COLUMN);
        assert_eq!(columns[0].type_label(), "int");
    }

    #[test]
    fn test_ignored_builder() {
        let field = FieldSchema::new("secret", FieldKind::Value(ValueType::Text)).ignored();
        assert!(field.ignore);
        let schema = Schema::Object(vec![field]);
        assert!(schema.columns().is_empty());
    }
}
