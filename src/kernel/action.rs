use std::time::Instant;

use super::ingest::IngestEvent;

#[derive(Debug, Clone)]
pub enum Action {
    Ingest(IngestEvent),
    Diagnostic(String),

    SetViewHeight { height: usize },
    MoveCursor { delta: isize },
    ExtendSelection { delta: isize },
    CursorFirst,
    CursorLast,
    Scroll { delta: isize },
    MoveColumn { delta: isize },
    ClickRow { row: usize, column: Option<usize>, now: Instant },
    HoverRow { row: Option<usize> },
    ToggleAtCursor,
    ActivateRow { row: usize },
    SelectAll,

    BeginEdit,
    EditInsert(char),
    EditBackspace,
    EditDelete,
    EditCursorLeft,
    EditCursorRight,
    EditCursorHome,
    EditCursorEnd,
    CommitEdit,
    CancelEdit,

    ContextMenuOpen { row: Option<usize>, x: u16, y: u16 },
    ContextMenuMoveSelection { delta: isize },
    ContextMenuSelect { index: usize },
    ContextMenuConfirm,
    ContextMenuClose,
    AddRow,
    DeleteSelectedRow,
    MoveRow { delta: isize },
    SortByColumn { column: usize },

    Submit,
    Cancel,
    Escape,
    Timeout,
    Terminate { code: i32 },
}
