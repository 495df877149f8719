//! Table control: the controller between the model and the grid.
//!
//! A `TableControl` owns the root cell of a document and displays one
//! table at a time. The displayed table is addressed by a path of cell
//! addresses from the root; the last cell on the path (or the root itself)
//! is the *parent cell*, and its sub-table is what the grid shows.
//!
//! Every structural change goes through [`TableControl::rebuild_page`] so
//! that row positions, the selection and the visible page stay in sync.

mod page;
mod selector;

pub use page::PageView;
pub use selector::CellSelector;

use tracing::{debug, trace};

use crate::model::{Cell, CellValue, Column, ModelError, Result, Row, RowId, TableData};

/// The location of a cell within one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    /// The row.
    pub row: RowId,
    /// The column index.
    pub column: usize,
}

impl CellAddress {
    /// Create a cell address.
    pub fn new(row: RowId, column: usize) -> Self {
        Self { row, column }
    }
}

/// Binds a document's root cell to the table currently on screen.
#[derive(Debug)]
pub struct TableControl {
    root: Cell,
    path: Vec<CellAddress>,
    selector: CellSelector,
    page: PageView,
}

impl TableControl {
    /// Create a control showing the root cell's table.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NotATable` if the root is a plain value.
    pub fn new(root: Cell, page_size: usize) -> Result<Self> {
        if !root.is_table_backed() {
            return Err(ModelError::NotATable);
        }

        let mut control = Self {
            root,
            path: Vec::new(),
            selector: CellSelector::new(),
            page: PageView::new(page_size),
        };
        control.rebuild_page();
        Ok(control)
    }

    /// The root cell.
    pub fn root(&self) -> &Cell {
        &self.root
    }

    /// Take the root cell, consuming the control.
    pub fn into_root(self) -> Cell {
        self.root
    }

    /// Path from the root to the displayed table.
    pub fn path(&self) -> &[CellAddress] {
        &self.path
    }

    /// How many levels below the root the displayed table is.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// The cell owning the displayed table.
    pub fn parent_cell(&self) -> Result<&Cell> {
        resolve(&self.root, &self.path)
    }

    /// Mutable access to the cell owning the displayed table.
    pub fn parent_cell_mut(&mut self) -> Result<&mut Cell> {
        resolve_mut(&mut self.root, &self.path)
    }

    /// The displayed table, or `None` if its parent cell is null.
    pub fn table_data(&self) -> Option<&TableData> {
        self.parent_cell().ok().and_then(Cell::sub_table)
    }

    /// Number of rows in the displayed table.
    pub fn row_count(&self) -> usize {
        self.table_data().map_or(0, TableData::len)
    }

    /// Visible columns of the displayed table, taken from the schema when
    /// the parent cell is null.
    pub fn columns(&self) -> Vec<Column> {
        match self.table_data() {
            Some(table) => table.columns().to_vec(),
            None => self.parent_cell().ok().map_or_else(Vec::new, |cell| match cell {
                Cell::List(list) => list.element_schema().columns(),
                Cell::SubItem(item) => item.schema().columns(),
                Cell::Value(_) => Vec::new(),
            }),
        }
    }

    /// Number of visible columns in the displayed table.
    pub fn column_count(&self) -> usize {
        match self.table_data() {
            Some(table) => table.columns().len(),
            None => self.columns().len(),
        }
    }

    /// The selection state.
    pub fn selector(&self) -> &CellSelector {
        &self.selector
    }

    /// Mutable access to the selection state.
    pub fn selector_mut(&mut self) -> &mut CellSelector {
        &mut self.selector
    }

    /// The visible page.
    pub fn page(&self) -> &PageView {
        &self.page
    }

    /// Rows of the displayed table that are selected, in position order.
    pub fn selected_rows(&self) -> Vec<&Row> {
        self.table_data()
            .map(|table| {
                table
                    .rows()
                    .iter()
                    .filter(|row| self.selector.is_selected(row.id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The address of the focused cell, if the table has rows.
    pub fn cursor_address(&self) -> Option<CellAddress> {
        let table = self.table_data()?;
        let row = table.row_at(self.selector.cursor_row())?;
        let column = self.selector.cursor_column();
        (column < table.columns().len()).then(|| CellAddress::new(row.id, column))
    }

    /// The focused cell, if any.
    pub fn cursor_cell(&self) -> Option<&Cell> {
        let address = self.cursor_address()?;
        self.table_data()?.cell(address.row, address.column).ok()
    }

    /// Remove a row from the displayed table.
    ///
    /// For a list this removes the element; for a nested object it sets the
    /// object back to null. Does not rebuild the page.
    pub fn remove_row(&mut self, id: RowId) -> Result<()> {
        match self.parent_cell_mut()? {
            Cell::List(list) => list.remove_item(id)?,
            Cell::SubItem(item) => {
                let table = item.sub_table().ok_or(ModelError::NullTable)?;
                if table.row(id).is_none() {
                    return Err(ModelError::RowNotFound(id));
                }
                item.clear();
            }
            Cell::Value(_) => return Err(ModelError::NotATable),
        }

        self.selector.deselect(id);
        debug!(row = %id, "Removed row");
        Ok(())
    }

    /// Display the table owned by the cell at `path`.
    ///
    /// Switching to a different table resets the cursor, the selection and
    /// the page; setting the current path again only rebuilds.
    pub fn set_table(&mut self, path: Vec<CellAddress>) -> Result<()> {
        if !resolve(&self.root, &path)?.is_table_backed() {
            return Err(ModelError::NotATable);
        }

        if path != self.path {
            debug!(depth = path.len(), "Switching displayed table");
            self.selector.reset();
            self.page.set_page(0);
            self.path = path;
        }
        self.rebuild_page();
        Ok(())
    }

    /// Descend into the table owned by a cell of the displayed table.
    pub fn open_cell(&mut self, address: CellAddress) -> Result<()> {
        let mut path = self.path.clone();
        path.push(address);
        self.set_table(path)
    }

    /// Go up one level, focusing the cell that was opened.
    ///
    /// Returns `false` if already at the root.
    pub fn close_table(&mut self) -> bool {
        let Some(child) = self.path.pop() else {
            return false;
        };

        self.selector.reset();
        let position = self
            .table_data()
            .and_then(|table| table.row(child.row))
            .map(|row| row.position);
        if let Some(position) = position {
            let (rows, columns) = (self.row_count(), self.column_count());
            self.selector.set_cursor(position, child.column, rows, columns);
            self.page.set_page(self.page.page_of(position));
        } else {
            self.page.set_page(0);
        }

        debug!(depth = self.path.len(), "Closed nested table");
        self.rebuild_page();
        true
    }

    /// Recompute the visible page after a structural change.
    pub fn rebuild_page(&mut self) {
        let table = resolve(&self.root, &self.path)
            .ok()
            .and_then(Cell::sub_table);
        let row_count = table.map_or(0, TableData::len);

        self.selector.sync_with(table);
        self.page.rebuild(row_count);

        let rows = self.page.rows();
        if !rows.is_empty() && !rows.contains(&self.selector.cursor_row()) {
            let column = self.selector.cursor_column();
            let columns = self.column_count();
            self.selector.set_cursor(rows.start, column, row_count, columns);
        }

        trace!(
            rows = row_count,
            page = self.page.page(),
            generation = self.page.generation(),
            "Rebuilt page"
        );
    }

    /// Move the cursor, turning the page when it leaves the visible window.
    pub fn move_cursor(&mut self, d_row: isize, d_column: isize) {
        let (rows, columns) = (self.row_count(), self.column_count());
        self.selector.move_cursor(d_row, d_column, rows, columns);

        if !self.page.rows().contains(&self.selector.cursor_row()) && rows > 0 {
            let page = self.page.page_of(self.selector.cursor_row());
            self.page.set_page(page);
            self.rebuild_page();
        }
    }

    /// Show the next page, if there is one.
    pub fn next_page(&mut self) -> bool {
        let pages = self.page.page_count(self.row_count());
        if self.page.page() + 1 >= pages {
            return false;
        }
        self.turn_to(self.page.page() + 1);
        true
    }

    /// Show the previous page, if there is one.
    pub fn prev_page(&mut self) -> bool {
        if self.page.page() == 0 {
            return false;
        }
        self.turn_to(self.page.page() - 1);
        true
    }

    fn turn_to(&mut self, page: usize) {
        self.page.set_page(page);
        let start = page * self.page.page_size();
        let (rows, columns) = (self.row_count(), self.column_count());
        let column = self.selector.cursor_column();
        self.selector.set_cursor(start, column, rows, columns);
        self.rebuild_page();
    }

    /// Move the cursor to a row and show its page.
    ///
    /// Returns `false` if the row is not in the displayed table.
    pub fn reveal_row(&mut self, id: RowId) -> bool {
        let Some(position) = self
            .table_data()
            .and_then(|table| table.row(id))
            .map(|row| row.position)
        else {
            return false;
        };

        let (rows, columns) = (self.row_count(), self.column_count());
        let column = self.selector.cursor_column();
        self.selector.set_cursor(position, column, rows, columns);
        self.page.set_page(self.page.page_of(position));
        self.rebuild_page();
        true
    }

    /// Toggle selection of the focused row. Returns the new state.
    pub fn toggle_cursor_selection(&mut self) -> Option<bool> {
        let row = self.cursor_address()?.row;
        Some(self.selector.toggle(row))
    }

    /// Replace the value of a scalar cell in the displayed table.
    pub fn set_cell_value(&mut self, address: CellAddress, value: CellValue) -> Result<()> {
        let table = self
            .parent_cell_mut()?
            .sub_table_mut()
            .ok_or(ModelError::NullTable)?;
        match table.cell_mut(address.row, address.column)? {
            Cell::Value(cell) => cell.set_value(value),
            Cell::List(_) | Cell::SubItem(_) => Err(ModelError::NotAValue),
        }
    }

    /// A JSONPath-like description of the displayed table, e.g. `$[2].stats`.
    pub fn breadcrumb(&self) -> String {
        let mut crumb = String::from("$");
        let mut current = &self.root;
        for address in &self.path {
            let Some(table) = current.sub_table() else {
                break;
            };
            let name = table
                .columns()
                .get(address.column)
                .map_or("?", |c| c.name.as_str());
            if let Cell::List(_) = current {
                if let Some(row) = table.row(address.row) {
                    crumb.push_str(&format!("[{}]", row.position));
                }
            }
            crumb.push('.');
            crumb.push_str(name);

            match table.cell(address.row, address.column) {
                Ok(cell) => current = cell,
                Err(_) => break,
            }
        }
        crumb
    }
}

/// Walk a path of addresses from the root to the cell it names.
fn resolve<'a>(root: &'a Cell, path: &[CellAddress]) -> Result<&'a Cell> {
    let mut current = root;
    for address in path {
        let table = current.sub_table().ok_or(ModelError::NullTable)?;
        current = table.cell(address.row, address.column)?;
    }
    Ok(current)
}

fn resolve_mut<'a>(root: &'a mut Cell, path: &[CellAddress]) -> Result<&'a mut Cell> {
    let mut current = root;
    for address in path {
        let table = current.sub_table_mut().ok_or(ModelError::NullTable)?;
        current = table.cell_mut(address.row, address.column)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;
    use serde_json::json;

    fn inventory() -> TableControl {
        let root = Document::root_from_json(
            &json!([
                {"name": "sword", "tags": ["sharp"], "stats": {"hp": 1}},
                {"name": "shield", "tags": [], "stats": null},
                {"name": "bow", "tags": null, "stats": {"hp": 3}}
            ]),
            &[],
        )
        .unwrap();
        TableControl::new(root, 2).unwrap()
    }

    fn column(control: &TableControl, name: &str) -> usize {
        control
            .table_data()
            .unwrap()
            .columns()
            .iter()
            .position(|c| c.name == name)
            .unwrap()
    }

    #[test]
    fn test_new_rejects_value_root() {
        let root = Cell::default_for(&crate::model::FieldKind::Value(crate::model::ValueType::Int));
        assert_eq!(TableControl::new(root, 10).unwrap_err(), ModelError::NotATable);
    }

    #[test]
    fn test_initial_page() {
        let control = inventory();
        assert_eq!(control.row_count(), 3);
        assert_eq!(control.page().rows(), 0..2);
        assert_eq!(control.page().generation(), 1);
        assert_eq!(control.breadcrumb(), "$");
    }

    #[test]
    fn test_open_and_close_nested_list() {
        let mut control = inventory();
        let tags = column(&control, "tags");
        let first = control.table_data().unwrap().rows()[0].id;

        control.open_cell(CellAddress::new(first, tags)).unwrap();
        assert_eq!(control.depth(), 1);
        assert_eq!(control.row_count(), 1);
        assert_eq!(control.breadcrumb(), "$[0].tags");

        assert!(control.close_table());
        assert_eq!(control.depth(), 0);
        assert_eq!(control.selector().cursor_column(), tags);
        assert!(!control.close_table());
    }

    #[test]
    fn test_open_value_cell_fails() {
        let mut control = inventory();
        let name = column(&control, "name");
        let first = control.table_data().unwrap().rows()[0].id;
        assert_eq!(
            control.open_cell(CellAddress::new(first, name)),
            Err(ModelError::NotATable)
        );
        assert_eq!(control.depth(), 0);
    }

    #[test]
    fn test_open_null_sub_item_shows_empty_table() {
        let mut control = inventory();
        let stats = column(&control, "stats");
        let second = control.table_data().unwrap().rows()[1].id;

        control.open_cell(CellAddress::new(second, stats)).unwrap();
        assert!(control.table_data().is_none());
        assert_eq!(control.row_count(), 0);
        assert_eq!(control.column_count(), 1);
        assert_eq!(control.breadcrumb(), "$[1].stats");
    }

    #[test]
    fn test_remove_row_from_sub_item_nulls_it() {
        let mut control = inventory();
        let stats = column(&control, "stats");
        let first = control.table_data().unwrap().rows()[0].id;
        control.open_cell(CellAddress::new(first, stats)).unwrap();

        let only = control.table_data().unwrap().rows()[0].id;
        control.remove_row(only).unwrap();
        assert!(control.table_data().is_none());
        match control.parent_cell().unwrap() {
            Cell::SubItem(item) => assert!(item.is_null()),
            other => panic!("unexpected parent {:?}", other),
        }
    }

    #[test]
    fn test_remove_missing_row() {
        let mut control = inventory();
        assert_eq!(
            control.remove_row(RowId::new(42)),
            Err(ModelError::RowNotFound(RowId::new(42)))
        );
    }

    #[test]
    fn test_move_cursor_turns_page() {
        let mut control = inventory();
        control.move_cursor(2, 0);
        assert_eq!(control.selector().cursor_row(), 2);
        assert_eq!(control.page().page(), 1);
        assert_eq!(control.page().rows(), 2..3);
    }

    #[test]
    fn test_next_and_prev_page() {
        let mut control = inventory();
        assert!(control.next_page());
        assert_eq!(control.selector().cursor_row(), 2);
        assert!(!control.next_page());
        assert!(control.prev_page());
        assert_eq!(control.selector().cursor_row(), 0);
        assert!(!control.prev_page());
    }

    #[test]
    fn test_set_cell_value() {
        let mut control = inventory();
        let name = column(&control, "name");
        let first = control.table_data().unwrap().rows()[0].id;
        let address = CellAddress::new(first, name);

        control
            .set_cell_value(address, CellValue::Text("axe".to_string()))
            .unwrap();
        assert_eq!(control.cursor_cell().map(Cell::summary), Some("axe".to_string()));

        assert!(matches!(
            control.set_cell_value(address, CellValue::Int(1)),
            Err(ModelError::TypeMismatch { .. })
        ));

        let tags = column(&control, "tags");
        assert_eq!(
            control.set_cell_value(CellAddress::new(first, tags), CellValue::Null),
            Err(ModelError::NotAValue)
        );
    }

    #[test]
    fn test_toggle_cursor_selection() {
        let mut control = inventory();
        assert_eq!(control.toggle_cursor_selection(), Some(true));
        assert_eq!(control.selected_rows().len(), 1);
        assert_eq!(control.toggle_cursor_selection(), Some(false));
        assert!(control.selected_rows().is_empty());
    }

    #[test]
    fn test_reveal_row() {
        let mut control = inventory();
        let last = control.table_data().unwrap().rows()[2].id;
        assert!(control.reveal_row(last));
        assert_eq!(control.page().page(), 1);
        assert_eq!(control.selector().cursor_row(), 2);
        assert!(!control.reveal_row(RowId::new(99)));
    }
}
