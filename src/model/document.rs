//! JSON documents.
//!
//! A document's root must be an array (loaded as a list cell) or an object
//! (loaded as a sub-item cell). The schema is inferred from the data and
//! fields named in the ignore list are hidden from the grid.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use super::cell::{Cell, ListCell, SubItemCell};
use super::schema::Schema;
use super::ModelError;

/// Errors that can occur when loading or saving documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read or write the file.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The root value is not an array or an object.
    #[error("Unsupported document root: {0} (expected a list or an object)")]
    UnsupportedRoot(String),

    /// The data does not fit the inferred schema.
    #[error("{0}")]
    Model(#[from] ModelError),
}

/// A JSON file opened for editing.
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    root: Cell,
}

impl Document {
    /// Load a document, hiding fields whose names are in `ignored`.
    pub fn load(path: impl AsRef<Path>, ignored: &[String]) -> Result<Self, DocumentError> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path).map_err(|source| DocumentError::Io {
            path: path.clone(),
            source,
        })?;
        let value: Value = serde_json::from_str(&contents)?;
        let root = Self::root_from_json(&value, ignored)?;

        info!(path = %path.display(), "Loaded document");
        Ok(Self { path, root })
    }

    /// Build a root cell from a JSON value.
    pub fn root_from_json(value: &Value, ignored: &[String]) -> Result<Cell, DocumentError> {
        match value {
            Value::Array(items) => {
                let schema = Schema::infer(items).with_ignored(ignored);
                debug!(rows = items.len(), "Inferred list root");
                Ok(Cell::List(ListCell::from_elements(schema, items)?))
            }
            Value::Object(_) => {
                let schema = Schema::infer(std::iter::once(value)).with_ignored(ignored);
                debug!("Inferred object root");
                Ok(Cell::SubItem(SubItemCell::from_object(schema, value)?))
            }
            other => Err(DocumentError::UnsupportedRoot(
                super::value::json_kind(other).to_string(),
            )),
        }
    }

    /// Write a root cell to a file as pretty-printed JSON.
    pub fn save(path: impl AsRef<Path>, root: &Cell) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(&root.to_json())?;
        fs::write(path, contents).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "Saved document");
        Ok(())
    }

    /// The file this document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The root cell.
    pub fn root(&self) -> &Cell {
        &self.root
    }

    /// Take the root cell, consuming the document.
    pub fn into_root(self) -> Cell {
        self.root
    }
}
