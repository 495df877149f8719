//! Row deletion strategies.

use tracing::{debug, info};

use crate::control::TableControl;
use crate::model::{Result, RowId};

/// Deletes rows from the displayed table.
pub trait RowDeletionStrategy {
    /// Delete rows from the table `control` is displaying.
    ///
    /// Returns the ids of the removed rows, in removal order.
    fn delete_row(&self, control: &mut TableControl) -> Result<Vec<RowId>>;
}

/// Deletes the selected rows, or the last row when nothing is selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionRowDeletion;

impl RowDeletionStrategy for SelectionRowDeletion {
    fn delete_row(&self, control: &mut TableControl) -> Result<Vec<RowId>> {
        let Some(table) = control.table_data().filter(|t| !t.is_empty()) else {
            debug!("Nothing to delete");
            return Ok(Vec::new());
        };

        let mut selected: Vec<(usize, RowId)> = control
            .selected_rows()
            .iter()
            .map(|row| (row.position, row.id))
            .collect();
        // Highest position first so earlier removals never shift later ones.
        selected.sort_by(|a, b| b.0.cmp(&a.0));

        let targets: Vec<RowId> = if selected.is_empty() {
            table.last_row().map(|row| row.id).into_iter().collect()
        } else {
            selected.into_iter().map(|(_, id)| id).collect()
        };

        for id in &targets {
            control.remove_row(*id)?;
        }
        control.rebuild_page();

        info!(count = targets.len(), "Deleted rows");
        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Document, ListCell, Schema, ValueType};
    use serde_json::{json, Value};

    fn control_for(value: Value) -> TableControl {
        let root = Document::root_from_json(&value, &[]).unwrap();
        TableControl::new(root, 10).unwrap()
    }

    fn ids(control: &TableControl) -> Vec<RowId> {
        control
            .table_data()
            .map(|t| t.rows().iter().map(|r| r.id).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_table_is_noop_without_rebuild() {
        let root = Cell::List(ListCell::empty(Schema::Scalar(ValueType::Int)));
        let mut control = TableControl::new(root, 10).unwrap();
        let before = control.page().generation();

        let removed = SelectionRowDeletion.delete_row(&mut control).unwrap();

        assert!(removed.is_empty());
        assert_eq!(control.page().generation(), before);
    }

    #[test]
    fn test_null_table_is_noop() {
        let root = Cell::List(ListCell::null(Schema::Scalar(ValueType::Int)));
        let mut control = TableControl::new(root, 10).unwrap();
        assert!(SelectionRowDeletion.delete_row(&mut control).unwrap().is_empty());
    }

    #[test]
    fn test_no_selection_removes_last_row() {
        let mut control = control_for(json!([1, 2, 3]));
        let all = ids(&control);

        let removed = SelectionRowDeletion.delete_row(&mut control).unwrap();

        assert_eq!(removed, vec![all[2]]);
        assert_eq!(ids(&control), all[..2].to_vec());
        assert_eq!(control.root().to_json(), json!([1, 2]));
    }

    #[test]
    fn test_selection_removed_highest_position_first() {
        let mut control = control_for(json!([10, 11, 12, 13, 14]));
        let all = ids(&control);
        control.selector_mut().select(all[1]);
        control.selector_mut().select(all[3]);
        control.selector_mut().select(all[4]);

        let removed = SelectionRowDeletion.delete_row(&mut control).unwrap();

        assert_eq!(removed, vec![all[4], all[3], all[1]]);
        assert_eq!(ids(&control), vec![all[0], all[2]]);
        assert_eq!(control.root().to_json(), json!([10, 12]));
        assert_eq!(control.selector().selected_count(), 0);
    }

    #[test]
    fn test_positions_are_contiguous_after_delete() {
        let mut control = control_for(json!(["a", "b", "c", "d"]));
        let all = ids(&control);
        control.selector_mut().select(all[0]);
        control.selector_mut().select(all[2]);

        SelectionRowDeletion.delete_row(&mut control).unwrap();

        let positions: Vec<usize> = control
            .table_data()
            .unwrap()
            .rows()
            .iter()
            .map(|r| r.position)
            .collect();
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn test_delete_rebuilds_page() {
        let mut control = control_for(json!([1, 2]));
        let before = control.page().generation();
        SelectionRowDeletion.delete_row(&mut control).unwrap();
        assert_eq!(control.page().generation(), before + 1);
        assert_eq!(control.page().rows(), 0..1);
    }

    #[test]
    fn test_delete_only_row_of_sub_item() {
        let mut control = control_for(json!({"a": 1}));
        let removed = SelectionRowDeletion.delete_row(&mut control).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(control.row_count(), 0);
        assert_eq!(control.root().to_json(), Value::Null);
    }
}
