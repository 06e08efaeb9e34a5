//! Row store: typed rows conforming to a schema, kept in insertion order.

use super::cell::{self, CellValue};
use super::schema::{ColumnType, Schema};

/// Stable identity of a row; never reused within one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    id: RowId,
    cells: Vec<Option<CellValue>>,
}

impl Row {
    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn cells(&self) -> &[Option<CellValue>] {
        &self.cells
    }

    pub fn cell(&self, column: usize) -> Option<&CellValue> {
        self.cells.get(column).and_then(Option::as_ref)
    }

    /// True when every cell has been set.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn is_checked(&self, column: usize) -> bool {
        self.cell(column)
            .and_then(CellValue::as_bool)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    schema: Schema,
    rows: Vec<Row>,
    next_id: u64,
}

impl Table {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
            next_id: 0,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub fn row_by_id(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn cell(&self, index: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(index).and_then(|row| row.cell(column))
    }

    /// Appends a row with every cell unset.
    pub fn append_empty(&mut self) -> RowId {
        let id = self.alloc_id();
        self.rows.push(Row {
            id,
            cells: vec![None; self.schema.len()],
        });
        id
    }

    /// Appends a row from values in column order; missing trailing cells stay unset.
    pub fn append_values(&mut self, values: Vec<CellValue>) -> RowId {
        let n = self.schema.len();
        let mut cells: Vec<Option<CellValue>> = values.into_iter().take(n).map(Some).collect();
        cells.resize(n, None);

        let id = self.alloc_id();
        self.rows.push(Row { id, cells });
        id
    }

    pub fn set_cell(&mut self, index: usize, column: usize, value: CellValue) -> bool {
        let Some(slot) = self
            .rows
            .get_mut(index)
            .and_then(|row| row.cells.get_mut(column))
        else {
            return false;
        };
        let changed = slot.as_ref() != Some(&value);
        *slot = Some(value);
        changed
    }

    pub fn set_cell_by_id(&mut self, id: RowId, column: usize, value: CellValue) -> bool {
        match self.index_of(id) {
            Some(index) => self.set_cell(index, column, value),
            None => false,
        }
    }

    /// Flips a checkbox cell. Non-checkbox columns are left alone.
    pub fn toggle_check(&mut self, index: usize, column: usize) -> bool {
        if self.schema.column_type(column) != Some(ColumnType::Checkbox) {
            return false;
        }
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        let current = row.is_checked(column);
        row.cells[column] = Some(CellValue::Check(!current));
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<Row> {
        if index < self.rows.len() {
            Some(self.rows.remove(index))
        } else {
            None
        }
    }

    pub fn move_row(&mut self, from: usize, to: usize) -> bool {
        if from >= self.rows.len() || to >= self.rows.len() || from == to {
            return false;
        }
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        true
    }

    /// Stable sort of the rows by one column.
    pub fn sort_by_column(&mut self, column: usize, descending: bool) -> bool {
        let Some(ty) = self.schema.column_type(column) else {
            return false;
        };
        self.rows.sort_by(|a, b| {
            let ord = cell::compare(ty, a.cell(column), b.cell(column));
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        true
    }

    fn alloc_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/table.rs"]
mod tests;
