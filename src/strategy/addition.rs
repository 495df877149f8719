//! Row addition strategies.

use tracing::info;

use crate::control::TableControl;
use crate::model::{Cell, Result, RowId};

/// What a row addition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAddition {
    /// A new element was appended to a list.
    Appended(RowId),
    /// A null nested object was given a default value.
    Materialized,
    /// Nothing applied to this table.
    Unchanged,
}

/// Adds a row to the displayed table.
pub trait RowAdditionStrategy {
    /// Add a row to the table `control` is displaying.
    fn add_row(&self, control: &mut TableControl) -> Result<RowAddition>;
}

/// Appends an empty element to a list-backed table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListRowAddition;

impl RowAdditionStrategy for ListRowAddition {
    fn add_row(&self, control: &mut TableControl) -> Result<RowAddition> {
        let Cell::List(list) = control.parent_cell_mut()? else {
            return Ok(RowAddition::Unchanged);
        };
        let id = list.add_empty_item();

        // The list may have just been created; show its sub-table.
        let path = control.path().to_vec();
        control.set_table(path)?;

        info!(row = %id, "Appended list element");
        Ok(RowAddition::Appended(id))
    }
}

/// Gives a null nested object its default value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullableRowAddition;

impl RowAdditionStrategy for NullableRowAddition {
    fn add_row(&self, control: &mut TableControl) -> Result<RowAddition> {
        let Cell::SubItem(item) = control.parent_cell_mut()? else {
            return Ok(RowAddition::Unchanged);
        };
        if !item.create_default_value() {
            return Ok(RowAddition::Unchanged);
        }

        control.rebuild_page();
        info!("Created default value for nested object");
        Ok(RowAddition::Materialized)
    }
}

/// Pick the addition strategy for a parent cell.
///
/// Plain values own no table and get no strategy.
pub fn addition_strategy_for(parent: &Cell) -> Option<&'static dyn RowAdditionStrategy> {
    match parent {
        Cell::List(_) => Some(&ListRowAddition),
        Cell::SubItem(_) => Some(&NullableRowAddition),
        Cell::Value(_) => None,
    }
}
