use std::time::Instant;

use super::ingest::RowAssembler;
use super::selection::{RowSelection, SelectionMode};
use super::table::{RowId, Table};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub editable: bool,
    pub multiple: bool,
    pub checkbox: bool,
    pub headers: bool,
    pub always_selected: bool,
    pub rules_hint: bool,
    pub title: Option<String>,
    pub text: Option<String>,
}

impl ListOptions {
    pub fn selection_mode(&self) -> SelectionMode {
        if self.multiple && !self.checkbox {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        }
    }
}

/// In-place editor for one text cell. `cursor` is a byte offset on a char boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEditor {
    pub row: RowId,
    pub column: usize,
    pub buffer: String,
    pub cursor: usize,
}

impl CellEditor {
    pub fn new(row: RowId, column: usize, text: String) -> Self {
        let cursor = text.len();
        Self {
            row,
            column,
            buffer: text,
            cursor,
        }
    }

    pub fn insert(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn backspace(&mut self) -> bool {
        let Some(prev) = self.prev_boundary() else {
            return false;
        };
        self.buffer.replace_range(prev..self.cursor, "");
        self.cursor = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        let Some(next) = self.next_boundary() else {
            return false;
        };
        self.buffer.replace_range(self.cursor..next, "");
        true
    }

    pub fn left(&mut self) -> bool {
        match self.prev_boundary() {
            Some(prev) => {
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    pub fn right(&mut self) -> bool {
        match self.next_boundary() {
            Some(next) => {
                self.cursor = next;
                true
            }
            None => false,
        }
    }

    pub fn home(&mut self) -> bool {
        let changed = self.cursor != 0;
        self.cursor = 0;
        changed
    }

    pub fn end(&mut self) -> bool {
        let changed = self.cursor != self.buffer.len();
        self.cursor = self.buffer.len();
        changed
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|ch| self.cursor + ch.len_utf8())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuItem {
    AddRow,
    DeleteRow,
}

impl ContextMenuItem {
    pub fn label(self) -> &'static str {
        match self {
            ContextMenuItem::AddRow => "Add row",
            ContextMenuItem::DeleteRow => "Delete row",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextMenuState {
    pub visible: bool,
    pub anchor: (u16, u16),
    pub selected: usize,
    pub items: Vec<ContextMenuItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub descending: bool,
}

#[derive(Debug)]
pub struct ListState {
    pub table: Table,
    pub selection: RowSelection,
    pub options: ListOptions,
    pub cursor: Option<usize>,
    pub column: usize,
    pub offset: usize,
    pub view_height: usize,
    pub editor: Option<CellEditor>,
    pub menu: ContextMenuState,
    pub sort: Option<SortState>,
    pub assembler: RowAssembler,
    pub streaming: bool,
    pub hover: Option<usize>,
    pub status: Option<String>,
    pub(crate) last_click: Option<(Instant, RowId)>,
}

impl ListState {
    pub const DOUBLE_CLICK_MS: u64 = 400;

    pub fn new(table: Table, options: ListOptions) -> Self {
        let selection = RowSelection::new(options.selection_mode());
        let mut state = Self {
            table,
            selection,
            options,
            cursor: None,
            column: 0,
            offset: 0,
            view_height: 0,
            editor: None,
            menu: ContextMenuState::default(),
            sort: None,
            assembler: RowAssembler::new(),
            streaming: false,
            hover: None,
            status: None,
            last_click: None,
        };
        state.apply_always_selected();
        state
    }

    pub fn cursor_row_id(&self) -> Option<RowId> {
        self.cursor
            .and_then(|index| self.table.row(index))
            .map(|row| row.id())
    }

    pub fn set_view_height(&mut self, height: usize) -> bool {
        if self.view_height == height {
            return false;
        }
        self.view_height = height;
        self.keep_cursor_visible();
        true
    }

    /// Moves the row cursor and selects only the new cursor row.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        let Some(target) = self.cursor_target(delta) else {
            return false;
        };
        self.cursor_to(target)
    }

    /// Moves the row cursor and adds the new row to the selection.
    pub fn extend_cursor(&mut self, delta: isize) -> bool {
        let Some(target) = self.cursor_target(delta) else {
            return false;
        };
        let prev = self.cursor;
        self.cursor = Some(target);
        self.keep_cursor_visible();
        let mut changed = prev != self.cursor;
        if let Some(id) = self.cursor_row_id() {
            changed |= self.selection.extend_with(id);
        }
        changed
    }

    pub fn cursor_to(&mut self, index: usize) -> bool {
        if index >= self.table.len() {
            return false;
        }
        let prev = self.cursor;
        self.cursor = Some(index);
        self.keep_cursor_visible();
        let mut changed = prev != self.cursor;
        if let Some(id) = self.cursor_row_id() {
            changed |= self.selection.select_only(id);
        }
        changed
    }

    pub fn scroll(&mut self, delta: isize) -> bool {
        let max_offset = self.table.len().saturating_sub(self.view_height.max(1));
        let next = self.offset.saturating_add_signed(delta).min(max_offset);
        let changed = next != self.offset;
        self.offset = next;
        changed
    }

    pub fn move_column(&mut self, delta: isize) -> bool {
        let last = self.table.schema().len().saturating_sub(1);
        let next = self.column.saturating_add_signed(delta).min(last);
        let changed = next != self.column;
        self.column = next;
        changed
    }

    /// Returns `(state_changed, double_click)`.
    pub fn click_row(&mut self, index: usize, now: Instant) -> (bool, bool) {
        let Some(id) = self.table.row(index).map(|row| row.id()) else {
            return (false, false);
        };

        let is_double_click = self
            .last_click
            .map(|(last_time, last_id)| {
                last_id == id
                    && now.duration_since(last_time).as_millis() as u64 <= Self::DOUBLE_CLICK_MS
            })
            .unwrap_or(false);

        if is_double_click {
            self.last_click = None;
            return (false, true);
        }

        self.last_click = Some((now, id));
        (self.cursor_to(index), false)
    }

    pub fn keep_cursor_visible(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let height = self.view_height.max(1);
        if cursor < self.offset {
            self.offset = cursor;
        } else if cursor >= self.offset + height {
            self.offset = cursor + 1 - height;
        }
    }

    /// Keeps cursor and scroll offset inside the table after rows disappear.
    pub fn clamp_cursor(&mut self) {
        let len = self.table.len();
        self.cursor = match self.cursor {
            Some(_) if len == 0 => None,
            Some(cursor) => Some(cursor.min(len - 1)),
            None => None,
        };
        let max_offset = len.saturating_sub(self.view_height.max(1));
        self.offset = self.offset.min(max_offset);
        self.keep_cursor_visible();
    }

    /// Selects the first row once one exists, when configured to.
    pub fn apply_always_selected(&mut self) -> bool {
        if !self.options.always_selected || !self.selection.is_empty() || self.table.is_empty() {
            return false;
        }
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
        match self.table.row(0).map(|row| row.id()) {
            Some(id) => self.selection.select_only(id),
            None => false,
        }
    }

    /// Tooltip text for the hovered row, falling back to the cursor row.
    pub fn tooltip(&self) -> Option<&str> {
        let column = self.table.schema().tooltip_column()?;
        let index = self.hover.or(self.cursor)?;
        self.table
            .cell(index, column)
            .and_then(|cell| cell.as_text())
            .filter(|text| !text.is_empty())
    }

    fn cursor_target(&self, delta: isize) -> Option<usize> {
        let len = self.table.len();
        if len == 0 {
            return None;
        }
        let target = match self.cursor {
            Some(cursor) => cursor.saturating_add_signed(delta).min(len - 1),
            None if delta < 0 => len - 1,
            None => 0,
        };
        Some(target)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
