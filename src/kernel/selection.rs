use rustc_hash::FxHashSet;

use super::table::{RowId, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multiple,
}

/// Selected rows, tracked by id so reordering and deletion keep it consistent.
#[derive(Debug, Clone)]
pub struct RowSelection {
    mode: SelectionMode,
    selected: FxHashSet<RowId>,
}

impl RowSelection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: FxHashSet::default(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.selected.contains(&id)
    }

    pub fn select_only(&mut self, id: RowId) -> bool {
        if self.selected.len() == 1 && self.selected.contains(&id) {
            return false;
        }
        self.selected.clear();
        self.selected.insert(id);
        true
    }

    /// Adds to the selection; in single mode this replaces it.
    pub fn extend_with(&mut self, id: RowId) -> bool {
        match self.mode {
            SelectionMode::Single => self.select_only(id),
            SelectionMode::Multiple => self.selected.insert(id),
        }
    }

    pub fn toggle(&mut self, id: RowId) -> bool {
        match self.mode {
            SelectionMode::Single => self.select_only(id),
            SelectionMode::Multiple => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
                true
            }
        }
    }

    pub fn select_all(&mut self, table: &Table) -> bool {
        if self.mode != SelectionMode::Multiple {
            return false;
        }
        let before = self.selected.len();
        self.selected.extend(table.rows().iter().map(|row| row.id()));
        self.selected.len() != before
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    pub fn remove(&mut self, id: RowId) -> bool {
        self.selected.remove(&id)
    }

    /// Indices of the selected rows in table order.
    pub fn indices(&self, table: &Table) -> Vec<usize> {
        table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| self.selected.contains(&row.id()))
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/selection.rs"]
mod tests;
