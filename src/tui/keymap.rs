//! Translates terminal input into store actions.

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::kernel::{Action, ListState};

use super::layout::ListLayout;

const WHEEL_STEP: isize = 3;

/// `None` means the event is ignored; `Resize` is handled by the caller.
pub fn map_event(
    state: &ListState,
    layout: &ListLayout,
    event: &Event,
    now: Instant,
) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(state, key),
        Event::Mouse(mouse) => map_mouse(state, layout, mouse, now),
        _ => None,
    }
}

fn map_key(state: &ListState, key: &KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Cancel);
    }

    if state.menu.visible {
        return Some(match key.code {
            KeyCode::Up => Action::ContextMenuMoveSelection { delta: -1 },
            KeyCode::Down => Action::ContextMenuMoveSelection { delta: 1 },
            KeyCode::Enter => Action::ContextMenuConfirm,
            _ => Action::ContextMenuClose,
        });
    }

    if state.editor.is_some() {
        return match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => Some(Action::CommitEdit),
            (KeyCode::Esc, _) => Some(Action::CancelEdit),
            (KeyCode::Backspace, _) => Some(Action::EditBackspace),
            (KeyCode::Delete, _) => Some(Action::EditDelete),
            (KeyCode::Left, _) => Some(Action::EditCursorLeft),
            (KeyCode::Right, _) => Some(Action::EditCursorRight),
            (KeyCode::Home, _) => Some(Action::EditCursorHome),
            (KeyCode::End, _) => Some(Action::EditCursorEnd),
            (KeyCode::Char(ch), mods) if mods.is_empty() || mods == KeyModifiers::SHIFT => {
                Some(Action::EditInsert(ch))
            }
            _ => None,
        };
    }

    let page = state.view_height.max(1) as isize;
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let action = match key.code {
        KeyCode::Up if alt => Action::MoveRow { delta: -1 },
        KeyCode::Down if alt => Action::MoveRow { delta: 1 },
        KeyCode::Up if shift => Action::ExtendSelection { delta: -1 },
        KeyCode::Down if shift => Action::ExtendSelection { delta: 1 },
        KeyCode::Up | KeyCode::Char('k') => Action::MoveCursor { delta: -1 },
        KeyCode::Down | KeyCode::Char('j') => Action::MoveCursor { delta: 1 },
        KeyCode::PageUp => Action::MoveCursor { delta: -page },
        KeyCode::PageDown => Action::MoveCursor { delta: page },
        KeyCode::Home | KeyCode::Char('g') => Action::CursorFirst,
        KeyCode::End | KeyCode::Char('G') => Action::CursorLast,
        KeyCode::Left | KeyCode::Char('h') => Action::MoveColumn { delta: -1 },
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Action::MoveColumn { delta: 1 },
        KeyCode::BackTab => Action::MoveColumn { delta: -1 },
        KeyCode::Char(' ') => Action::ToggleAtCursor,
        KeyCode::Char('a') if ctrl => Action::SelectAll,
        KeyCode::Enter => Action::Submit,
        KeyCode::Esc | KeyCode::Char('q') => Action::Escape,
        KeyCode::F(2) | KeyCode::Char('e') => Action::BeginEdit,
        KeyCode::Char('m') | KeyCode::Menu => {
            let (x, y) = state
                .cursor
                .map(|cursor| (2, cursor.saturating_sub(state.offset) as u16 + 2))
                .unwrap_or((2, 2));
            Action::ContextMenuOpen {
                row: state.cursor,
                x,
                y,
            }
        }
        KeyCode::Insert => Action::AddRow,
        KeyCode::Delete => Action::DeleteSelectedRow,
        KeyCode::Char('s') => Action::SortByColumn {
            column: state.column,
        },
        _ => return None,
    };
    Some(action)
}

fn map_mouse(
    state: &ListState,
    layout: &ListLayout,
    mouse: &MouseEvent,
    now: Instant,
) -> Option<Action> {
    let (x, y) = (mouse.column, mouse.row);

    if state.menu.visible {
        return match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match layout.menu_item_at(x, y) {
                Some(index) => Some(Action::ContextMenuSelect { index }),
                None if layout.in_menu(x, y) => None,
                None => Some(Action::ContextMenuClose),
            },
            MouseEventKind::Down(_) => Some(Action::ContextMenuClose),
            _ => None,
        };
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(column) = layout.header_column_at(x, y) {
                return Some(Action::SortByColumn { column });
            }
            let row = layout.row_at(state, x, y)?;
            Some(Action::ClickRow {
                row,
                column: layout.column_at(x),
                now,
            })
        }
        MouseEventKind::Down(MouseButton::Right) => Some(Action::ContextMenuOpen {
            row: layout.row_at(state, x, y),
            x,
            y,
        }),
        MouseEventKind::ScrollUp => Some(Action::Scroll { delta: -WHEEL_STEP }),
        MouseEventKind::ScrollDown => Some(Action::Scroll { delta: WHEEL_STEP }),
        MouseEventKind::Moved => {
            let row = layout.row_at(state, x, y);
            (row != state.hover).then_some(Action::HoverRow { row })
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/keymap.rs"]
mod tests;
