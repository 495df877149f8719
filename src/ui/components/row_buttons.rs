//! Add-row and delete-row toolbar buttons.
//!
//! Each button pairs a [`Button`] with a row strategy. Pressing a button
//! runs the strategy against the table control and reports what happened
//! as a [`RowAction`] for the owning view to react to.

use tracing::debug;

use super::button::{Button, WidgetHandle, OFF_OPACITY, ON_OPACITY};
use crate::control::TableControl;
use crate::model::{Cell, Result, RowId};
use crate::strategy::{
    addition_strategy_for, RowAddition, RowDeletionStrategy, SelectionRowDeletion,
};

/// Message emitted by a row button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// A row was added.
    RowAdded(RowAddition),
    /// These rows were deleted, highest position first.
    RowsDeleted(Vec<RowId>),
}

/// Adds a row using the strategy that fits the displayed table.
#[derive(Debug, Clone)]
pub struct AddRowButton {
    button: Button,
}

impl AddRowButton {
    /// Create the button.
    pub fn new() -> Self {
        Self {
            button: Button::new("Add row", 'a'),
        }
    }

    /// The underlying widget.
    pub fn button(&self) -> &Button {
        &self.button
    }

    /// Run the addition strategy for the displayed table.
    pub fn press(&self, control: &mut TableControl) -> Result<Option<RowAction>> {
        let Some(strategy) = addition_strategy_for(control.parent_cell()?) else {
            return Ok(None);
        };

        match strategy.add_row(control)? {
            RowAddition::Unchanged => {
                debug!("Add row had no effect");
                Ok(None)
            }
            outcome => Ok(Some(RowAction::RowAdded(outcome))),
        }
    }

    /// Dim the button when pressing it would do nothing.
    pub fn refresh(&mut self, control: &TableControl) {
        let enabled = match control.parent_cell() {
            Ok(Cell::List(_)) => true,
            Ok(Cell::SubItem(item)) => item.is_null(),
            _ => false,
        };
        self.button
            .set_opacity(if enabled { ON_OPACITY } else { OFF_OPACITY });
    }
}

impl Default for AddRowButton {
    fn default() -> Self {
        Self::new()
    }
}

/// Deletes rows with a deletion strategy.
pub struct DeleteRowButton {
    button: Button,
    strategy: Box<dyn RowDeletionStrategy>,
}

impl DeleteRowButton {
    /// Create the button with the selection-based strategy.
    pub fn new() -> Self {
        Self::with_strategy(Box::new(SelectionRowDeletion))
    }

    /// Create the button with a custom strategy.
    pub fn with_strategy(strategy: Box<dyn RowDeletionStrategy>) -> Self {
        Self {
            button: Button::new("Delete", 'd'),
            strategy,
        }
    }

    /// The underlying widget.
    pub fn button(&self) -> &Button {
        &self.button
    }

    /// Run the deletion strategy.
    pub fn press(&self, control: &mut TableControl) -> Result<Option<RowAction>> {
        let removed = self.strategy.delete_row(control)?;
        if removed.is_empty() {
            return Ok(None);
        }
        Ok(Some(RowAction::RowsDeleted(removed)))
    }

    /// Dim the button when the table has no rows.
    pub fn refresh(&mut self, control: &TableControl) {
        let enabled = control.row_count() > 0;
        self.button
            .set_opacity(if enabled { ON_OPACITY } else { OFF_OPACITY });
    }
}

impl Default for DeleteRowButton {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, ListCell, Schema, SubItemCell, ValueType};
    use serde_json::json;

    fn control_for(value: serde_json::Value) -> TableControl {
        TableControl::new(Document::root_from_json(&value, &[]).unwrap(), 10).unwrap()
    }

    #[test]
    fn test_add_to_list() {
        let mut control = control_for(json!([1, 2]));
        let action = AddRowButton::new().press(&mut control).unwrap();
        assert!(matches!(
            action,
            Some(RowAction::RowAdded(RowAddition::Appended(_)))
        ));
        assert_eq!(control.row_count(), 3);
    }

    #[test]
    fn test_add_to_present_object_is_silent() {
        let mut control = control_for(json!({"a": 1}));
        assert_eq!(AddRowButton::new().press(&mut control).unwrap(), None);
    }

    #[test]
    fn test_delete_emits_rows_deleted() {
        let mut control = control_for(json!([1, 2]));
        let last = control.table_data().unwrap().rows()[1].id;
        let action = DeleteRowButton::new().press(&mut control).unwrap();
        assert_eq!(action, Some(RowAction::RowsDeleted(vec![last])));
    }

    #[test]
    fn test_delete_on_empty_table_is_silent() {
        let root = Cell::List(ListCell::empty(Schema::Scalar(ValueType::Int)));
        let mut control = TableControl::new(root, 10).unwrap();
        assert_eq!(DeleteRowButton::new().press(&mut control).unwrap(), None);
    }

    #[test]
    fn test_refresh_dims_unusable_buttons() {
        let root = Cell::SubItem(SubItemCell::null(Schema::Scalar(ValueType::Int)));
        let control = TableControl::new(root, 10).unwrap();

        let mut add = AddRowButton::new();
        let mut delete = DeleteRowButton::new();
        add.refresh(&control);
        delete.refresh(&control);
        assert_eq!(add.button().opacity(), ON_OPACITY);
        assert_eq!(delete.button().opacity(), OFF_OPACITY);

        let control = control_for(json!({"a": 1}));
        add.refresh(&control);
        delete.refresh(&control);
        assert_eq!(add.button().opacity(), OFF_OPACITY);
        assert_eq!(delete.button().opacity(), ON_OPACITY);
    }
}
