//! Cursor and row selection for the displayed table.

use std::collections::BTreeSet;

use crate::model::{RowId, TableData};

/// Tracks the focused cell and the set of selected rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellSelector {
    /// Focused row position.
    row: usize,
    /// Focused column index.
    column: usize,
    /// Ids of selected rows.
    selected: BTreeSet<RowId>,
}

impl CellSelector {
    /// Create a selector with the cursor at the origin and nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Focused row position.
    pub fn cursor_row(&self) -> usize {
        self.row
    }

    /// Focused column index.
    pub fn cursor_column(&self) -> usize {
        self.column
    }

    /// Move the cursor, clamped to a table of the given size.
    pub fn set_cursor(&mut self, row: usize, column: usize, rows: usize, columns: usize) {
        self.row = row.min(rows.saturating_sub(1));
        self.column = column.min(columns.saturating_sub(1));
    }

    /// Move the cursor by a signed offset, clamped to the table.
    pub fn move_cursor(&mut self, d_row: isize, d_column: isize, rows: usize, columns: usize) {
        let row = self.row.saturating_add_signed(d_row);
        let column = self.column.saturating_add_signed(d_column);
        self.set_cursor(row, column, rows, columns);
    }

    /// Select a row.
    pub fn select(&mut self, id: RowId) {
        self.selected.insert(id);
    }

    /// Deselect a row.
    pub fn deselect(&mut self, id: RowId) {
        self.selected.remove(&id);
    }

    /// Toggle selection of a row. Returns the new state.
    pub fn toggle(&mut self, id: RowId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, id: RowId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected row ids in id order.
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.selected.iter().copied().collect()
    }

    /// Number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Reset cursor and selection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drop ids no longer in the table and clamp the cursor.
    pub fn sync_with(&mut self, table: Option<&TableData>) {
        match table {
            Some(table) => {
                self.selected.retain(|id| table.row(*id).is_some());
                let (row, column) = (self.row, self.column);
                self.set_cursor(row, column, table.len(), table.columns().len());
            }
            None => self.reset(),
        }
    }
}
