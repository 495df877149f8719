//! Grid view: renders the visible page of the displayed table.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell as GridCell, Paragraph, Row as GridRow, Table},
    Frame,
};

use crate::control::TableControl;
use crate::model::{Cell, Column};
use crate::ui::theme::Theme;

/// Width of the leading position column.
const POSITION_WIDTH: u16 = 7;

/// Stateless renderer for a [`TableControl`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GridView {
    /// Show each column's type under its name.
    pub show_types: bool,
}

impl GridView {
    /// Create a grid view, optionally labelling headers with column types.
    pub fn new(show_types: bool) -> Self {
        Self { show_types }
    }

    /// Header cells: the position column followed by one per table column.
    pub fn header_labels(&self, columns: &[Column]) -> Vec<String> {
        let mut labels = vec!["#".to_string()];
        labels.extend(columns.iter().map(|column| {
            if self.show_types {
                format!("{}: {}", column.name, column.type_label())
            } else {
                column.name.clone()
            }
        }));
        labels
    }

    /// Text lines of the visible page, one per row, without styling.
    pub fn page_lines(&self, control: &TableControl) -> Vec<Vec<String>> {
        let Some(table) = control.table_data() else {
            return Vec::new();
        };
        let rows = control.page().rows();
        table
            .rows()
            .get(rows)
            .unwrap_or_default()
            .iter()
            .map(|row| {
                let mark = if control.selector().is_selected(row.id) {
                    "*"
                } else {
                    " "
                };
                let mut line = vec![format!("{}{}", mark, row.position)];
                line.extend(row.cells.iter().map(Cell::summary));
                line
            })
            .collect()
    }

    /// Draw the displayed page of `control` into `area`.
    ///
    /// The breadcrumb becomes the block title and the cursor cell is
    /// highlighted. A null table draws a hint for creating it.
    pub fn render(&self, frame: &mut Frame, area: Rect, control: &TableControl, theme: &Theme) {
        let block = Block::default()
            .title(format!(" {} ", control.breadcrumb()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.dim));

        let columns = control.columns();
        let Some(table) = control.table_data() else {
            let message = Paragraph::new(Line::styled(
                "null - press [a] to create a value",
                Style::default().fg(theme.dim),
            ))
            .block(block);
            frame.render_widget(message, area);
            return;
        };

        let header = GridRow::new(
            self.header_labels(&columns)
                .into_iter()
                .map(|label| GridCell::from(label).style(theme.header_style())),
        )
        .height(1);

        let cursor = control.cursor_address();
        let lines = self.page_lines(control);
        let page_rows = table.rows().get(control.page().rows()).unwrap_or_default();

        let rows = page_rows.iter().zip(lines).map(|(row, line)| {
            let cells = line.into_iter().enumerate().map(|(index, text)| {
                let style = match index.checked_sub(1) {
                    None => Style::default().fg(theme.dim),
                    Some(column) => {
                        let is_cursor = cursor
                            .map_or(false, |c| c.row == row.id && c.column == column);
                        if is_cursor {
                            theme.cursor_style()
                        } else {
                            row.cells
                                .get(column)
                                .map_or_else(Style::default, |cell| cell_style(cell, theme))
                        }
                    }
                };
                GridCell::from(text).style(style)
            });

            let row_style = if control.selector().is_selected(row.id) {
                theme.selected_style()
            } else {
                Style::default()
            };
            GridRow::new(cells).style(row_style)
        });

        let mut widths = vec![Constraint::Length(POSITION_WIDTH)];
        widths.extend(columns.iter().map(|_| Constraint::Fill(1)));

        let grid = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1);
        frame.render_widget(grid, area);
    }
}

fn cell_style(cell: &Cell, theme: &Theme) -> Style {
    match cell {
        Cell::Value(value) if value.value().is_null() => Style::default().fg(theme.dim),
        Cell::Value(_) => Style::default().fg(theme.fg),
        Cell::List(_) | Cell::SubItem(_) => Style::default()
            .fg(theme.nested)
            .add_modifier(Modifier::ITALIC),
    }
}
