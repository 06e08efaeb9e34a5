use super::cell::{self, CellValue};
use super::image::ImageLoader;
use super::ingest::IngestEvent;
use super::state::{CellEditor, ContextMenuItem, ContextMenuState, ListState, SortState};
use super::{Action, DialogResponse, Effect};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn close(response: DialogResponse) -> Self {
        Self {
            effects: vec![Effect::Close(response)],
            state_changed: false,
        }
    }
}

/// Owns the dialog state; every mutation goes through [`Store::dispatch`].
pub struct Store {
    state: ListState,
    images: Box<dyn ImageLoader>,
}

impl Store {
    pub fn new(state: ListState, images: Box<dyn ImageLoader>) -> Self {
        Self { state, images }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn into_state(self) -> ListState {
        self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::Ingest(event) => self.ingest(event),
            Action::Diagnostic(message) => {
                let changed = self.state.status.as_deref() != Some(message.as_str());
                self.state.status = Some(message);
                DispatchResult::changed(changed)
            }

            Action::SetViewHeight { height } => {
                DispatchResult::changed(self.state.set_view_height(height))
            }
            Action::MoveCursor { delta } => {
                DispatchResult::changed(self.state.move_cursor(delta))
            }
            Action::ExtendSelection { delta } => {
                DispatchResult::changed(self.state.extend_cursor(delta))
            }
            Action::CursorFirst => DispatchResult::changed(self.state.cursor_to(0)),
            Action::CursorLast => {
                let last = self.state.table.len().saturating_sub(1);
                DispatchResult::changed(self.state.cursor_to(last))
            }
            Action::Scroll { delta } => DispatchResult::changed(self.state.scroll(delta)),
            Action::MoveColumn { delta } => {
                DispatchResult::changed(self.state.move_column(delta))
            }
            Action::ClickRow { row, column, now } => self.click_row(row, column, now),
            Action::HoverRow { row } => {
                let changed = self.state.hover != row;
                self.state.hover = row;
                DispatchResult::changed(changed)
            }
            Action::ToggleAtCursor => self.toggle_at_cursor(),
            Action::ActivateRow { row } => self.activate_row(row),
            Action::SelectAll => {
                DispatchResult::changed(self.state.selection.select_all(&self.state.table))
            }

            Action::BeginEdit => self.begin_edit(),
            Action::EditInsert(ch) => self.edit(|editor| {
                editor.insert(ch);
                true
            }),
            Action::EditBackspace => self.edit(CellEditor::backspace),
            Action::EditDelete => self.edit(CellEditor::delete),
            Action::EditCursorLeft => self.edit(CellEditor::left),
            Action::EditCursorRight => self.edit(CellEditor::right),
            Action::EditCursorHome => self.edit(CellEditor::home),
            Action::EditCursorEnd => self.edit(CellEditor::end),
            Action::CommitEdit => self.commit_edit(),
            Action::CancelEdit => DispatchResult::changed(self.state.editor.take().is_some()),

            Action::ContextMenuOpen { row, x, y } => self.open_context_menu(row, x, y),
            Action::ContextMenuMoveSelection { delta } => {
                let menu = &mut self.state.menu;
                if !menu.visible || menu.items.is_empty() {
                    return DispatchResult::changed(false);
                }
                let last = menu.items.len() - 1;
                let next = menu.selected.saturating_add_signed(delta).min(last);
                let changed = next != menu.selected;
                menu.selected = next;
                DispatchResult::changed(changed)
            }
            Action::ContextMenuSelect { index } => {
                let menu = &mut self.state.menu;
                if !menu.visible || index >= menu.items.len() {
                    return DispatchResult::changed(false);
                }
                menu.selected = index;
                self.confirm_context_menu()
            }
            Action::ContextMenuConfirm => self.confirm_context_menu(),
            Action::ContextMenuClose => {
                let changed = self.state.menu.visible;
                self.state.menu = ContextMenuState::default();
                DispatchResult::changed(changed)
            }
            Action::AddRow => self.add_row(),
            Action::DeleteSelectedRow => self.delete_selected_row(),
            Action::MoveRow { delta } => self.move_row(delta),
            Action::SortByColumn { column } => self.sort_by_column(column),

            Action::Submit => DispatchResult::close(DialogResponse::Ok),
            Action::Cancel => DispatchResult::close(DialogResponse::Cancel),
            Action::Escape => DispatchResult::close(DialogResponse::Escape),
            Action::Timeout => DispatchResult::close(DialogResponse::Timeout),
            Action::Terminate { code } => DispatchResult::close(DialogResponse::Signal(code)),
        }
    }

    fn ingest(&mut self, event: IngestEvent) -> DispatchResult {
        match event {
            IngestEvent::Line(line) => {
                self.state
                    .assembler
                    .push(&mut self.state.table, &line, self.images.as_ref());
                self.state.apply_always_selected();
                DispatchResult::changed(true)
            }
            IngestEvent::Closed => {
                if self.state.assembler.is_closed() {
                    return DispatchResult::changed(false);
                }
                let was_streaming = self.state.streaming;
                self.state.assembler.close();
                self.state.streaming = false;
                tracing::info!(
                    rows = self.state.table.len(),
                    lines = self.state.assembler.lines(),
                    "list input finished"
                );
                DispatchResult::changed(was_streaming)
            }
        }
    }

    fn click_row(
        &mut self,
        row: usize,
        column: Option<usize>,
        now: std::time::Instant,
    ) -> DispatchResult {
        let mut changed = self.state.editor.take().is_some();
        let last = self.state.table.schema().len().saturating_sub(1);
        let column = column.map(|column| column.min(last));
        if let Some(column) = column {
            changed |= self.state.column != column;
            self.state.column = column;
        }

        let (click_changed, double_click) = self.state.click_row(row, now);
        changed |= click_changed;

        if double_click {
            // The first click of the pair already toggled the row's checkbox.
            if self.state.options.checkbox && column == Some(0) {
                return DispatchResult::changed(changed);
            }
            return self.activate_row(row);
        }

        if let Some(column) = column {
            if self.state.table.toggle_check(row, column) {
                changed = true;
            }
        }
        DispatchResult::changed(changed)
    }

    /// Space: toggles a checkbox under the cursor, else the row's selection.
    fn toggle_at_cursor(&mut self) -> DispatchResult {
        let Some(cursor) = self.state.cursor else {
            return DispatchResult::changed(self.state.move_cursor(0));
        };
        if self.state.table.toggle_check(cursor, self.state.column) {
            return DispatchResult::changed(true);
        }
        match self.state.cursor_row_id() {
            Some(id) => DispatchResult::changed(self.state.selection.toggle(id)),
            None => DispatchResult::changed(false),
        }
    }

    /// Row activation (double click). Checkbox tables toggle column 0.
    fn activate_row(&mut self, row: usize) -> DispatchResult {
        if !self.state.options.checkbox {
            return DispatchResult::changed(false);
        }
        DispatchResult::changed(self.state.table.toggle_check(row, 0))
    }

    fn begin_edit(&mut self) -> DispatchResult {
        if !self.state.options.editable || self.state.editor.is_some() {
            return DispatchResult::changed(false);
        }
        let column = self.state.column;
        let Some(ty) = self.state.table.schema().column_type(column) else {
            return DispatchResult::changed(false);
        };
        if !ty.is_textual() {
            return DispatchResult::changed(false);
        }
        let (Some(index), Some(id)) = (self.state.cursor, self.state.cursor_row_id()) else {
            return DispatchResult::changed(false);
        };

        let text = cell::edit_text(self.state.table.cell(index, column));
        self.state.editor = Some(CellEditor::new(id, column, text));
        DispatchResult::changed(true)
    }

    fn edit(&mut self, f: impl FnOnce(&mut CellEditor) -> bool) -> DispatchResult {
        match self.state.editor.as_mut() {
            Some(editor) => DispatchResult::changed(f(editor)),
            None => DispatchResult::changed(false),
        }
    }

    fn commit_edit(&mut self) -> DispatchResult {
        let Some(editor) = self.state.editor.take() else {
            return DispatchResult::changed(false);
        };
        let Some(ty) = self.state.table.schema().column_type(editor.column) else {
            return DispatchResult::changed(true);
        };

        let value = CellValue::coerce(ty, &editor.buffer, self.images.as_ref());
        if !self
            .state
            .table
            .set_cell_by_id(editor.row, editor.column, value)
        {
            tracing::debug!(column = editor.column, "edit left cell unchanged");
        }
        DispatchResult::changed(true)
    }

    fn open_context_menu(&mut self, row: Option<usize>, x: u16, y: u16) -> DispatchResult {
        if !self.state.options.editable {
            return DispatchResult::changed(false);
        }

        let mut changed = self.state.editor.take().is_some();
        if let Some(row) = row {
            changed |= self.state.cursor_to(row);
        }

        let prev = self.state.menu.clone();
        self.state.menu = ContextMenuState {
            visible: true,
            anchor: (x, y),
            selected: 0,
            items: vec![ContextMenuItem::AddRow, ContextMenuItem::DeleteRow],
        };
        changed |= self.state.menu != prev;
        DispatchResult::changed(changed)
    }

    fn confirm_context_menu(&mut self) -> DispatchResult {
        let menu = std::mem::take(&mut self.state.menu);
        if !menu.visible {
            return DispatchResult::changed(false);
        }
        match menu.items.get(menu.selected).copied() {
            Some(ContextMenuItem::AddRow) => self.add_row(),
            Some(ContextMenuItem::DeleteRow) => {
                let mut result = self.delete_selected_row();
                result.state_changed = true;
                result
            }
            None => DispatchResult::changed(true),
        }
    }

    fn add_row(&mut self) -> DispatchResult {
        if !self.state.options.editable {
            return DispatchResult::changed(false);
        }
        self.state.table.append_empty();
        self.state.apply_always_selected();
        DispatchResult::changed(true)
    }

    /// Removes the cursor row when it is selected; otherwise does nothing.
    fn delete_selected_row(&mut self) -> DispatchResult {
        if !self.state.options.editable {
            return DispatchResult::changed(false);
        }
        let Some(id) = self.state.cursor_row_id() else {
            return DispatchResult::changed(false);
        };
        if !self.state.selection.is_selected(id) {
            return DispatchResult::changed(false);
        }
        let Some(index) = self.state.table.index_of(id) else {
            return DispatchResult::changed(false);
        };

        self.state.table.remove(index);
        self.state.selection.remove(id);
        if self.state.editor.as_ref().is_some_and(|e| e.row == id) {
            self.state.editor = None;
        }
        self.state.clamp_cursor();
        if let Some(next) = self.state.cursor_row_id() {
            self.state.selection.select_only(next);
        }
        DispatchResult::changed(true)
    }

    fn move_row(&mut self, delta: isize) -> DispatchResult {
        if !self.state.options.editable {
            return DispatchResult::changed(false);
        }
        let Some(cursor) = self.state.cursor else {
            return DispatchResult::changed(false);
        };
        let last = self.state.table.len().saturating_sub(1);
        let target = cursor.saturating_add_signed(delta).min(last);
        if !self.state.table.move_row(cursor, target) {
            return DispatchResult::changed(false);
        }
        self.state.cursor = Some(target);
        self.state.sort = None;
        self.state.keep_cursor_visible();
        DispatchResult::changed(true)
    }

    fn sort_by_column(&mut self, column: usize) -> DispatchResult {
        let sortable = self
            .state
            .table
            .schema()
            .column_type(column)
            .is_some_and(|ty| ty.is_textual());
        if !sortable {
            return DispatchResult::changed(false);
        }

        let descending = matches!(
            self.state.sort,
            Some(SortState { column: c, descending: false }) if c == column
        );
        let cursor_id = self.state.cursor_row_id();

        self.state.table.sort_by_column(column, descending);
        self.state.sort = Some(SortState { column, descending });
        self.state.column = column;

        if let Some(id) = cursor_id {
            self.state.cursor = self.state.table.index_of(id);
            self.state.keep_cursor_visible();
        }
        DispatchResult::changed(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
