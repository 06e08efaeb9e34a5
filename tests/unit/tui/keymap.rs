use super::*;
use crate::kernel::state::{CellEditor, ListOptions};
use crate::kernel::{CellValue, Schema, Table};
use ratatui::layout::Rect;

fn setup() -> (ListState, ListLayout) {
    let mut table = Table::new(Schema::parse(&["Name", "Note"], false).unwrap());
    for name in ["alpha", "beta", "gamma"] {
        table.append_values(vec![CellValue::Text(name.into()), CellValue::Text("n".into())]);
    }
    let options = ListOptions {
        headers: true,
        editable: true,
        ..ListOptions::default()
    };
    let state = ListState::new(table, options);
    let layout = ListLayout::compute(Rect::new(0, 0, 40, 12), &state);
    (state, layout)
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn key_with(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn map(state: &ListState, layout: &ListLayout, event: Event) -> Option<Action> {
    map_event(state, layout, &event, Instant::now())
}

#[test]
fn enter_confirms_and_escape_closes() {
    let (state, layout) = setup();
    assert!(matches!(map(&state, &layout, key(KeyCode::Enter)), Some(Action::Submit)));
    assert!(matches!(map(&state, &layout, key(KeyCode::Esc)), Some(Action::Escape)));
    assert!(matches!(
        map(&state, &layout, key_with(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(Action::Cancel)
    ));
}

#[test]
fn key_release_is_ignored() {
    let (state, layout) = setup();
    let release = Event::Key(KeyEvent::new_with_kind(
        KeyCode::Enter,
        KeyModifiers::NONE,
        KeyEventKind::Release,
    ));
    assert!(map(&state, &layout, release).is_none());
}

#[test]
fn navigation_keys_move_cursor_and_column() {
    let (mut state, layout) = setup();
    state.view_height = 8;

    assert!(matches!(
        map(&state, &layout, key(KeyCode::Char('j'))),
        Some(Action::MoveCursor { delta: 1 })
    ));
    assert!(matches!(
        map(&state, &layout, key(KeyCode::PageUp)),
        Some(Action::MoveCursor { delta: -8 })
    ));
    assert!(matches!(
        map(&state, &layout, key_with(KeyCode::Down, KeyModifiers::SHIFT)),
        Some(Action::ExtendSelection { delta: 1 })
    ));
    assert!(matches!(
        map(&state, &layout, key_with(KeyCode::Up, KeyModifiers::ALT)),
        Some(Action::MoveRow { delta: -1 })
    ));
    assert!(matches!(
        map(&state, &layout, key(KeyCode::Right)),
        Some(Action::MoveColumn { delta: 1 })
    ));
    assert!(matches!(
        map(&state, &layout, key(KeyCode::End)),
        Some(Action::CursorLast)
    ));
}

#[test]
fn editing_mode_routes_characters_to_the_editor() {
    let (mut state, layout) = setup();
    let id = state.table.row(0).unwrap().id();
    state.editor = Some(CellEditor::new(id, 0, "alpha".into()));

    assert!(matches!(
        map(&state, &layout, key(KeyCode::Char('q'))),
        Some(Action::EditInsert('q'))
    ));
    assert!(matches!(
        map(&state, &layout, key(KeyCode::Enter)),
        Some(Action::CommitEdit)
    ));
    assert!(matches!(
        map(&state, &layout, key(KeyCode::Esc)),
        Some(Action::CancelEdit)
    ));
    assert!(matches!(
        map(&state, &layout, key(KeyCode::Delete)),
        Some(Action::EditDelete)
    ));
}

#[test]
fn open_menu_captures_keys() {
    let (mut state, layout) = setup();
    state.menu.visible = true;

    assert!(matches!(
        map(&state, &layout, key(KeyCode::Down)),
        Some(Action::ContextMenuMoveSelection { delta: 1 })
    ));
    assert!(matches!(
        map(&state, &layout, key(KeyCode::Enter)),
        Some(Action::ContextMenuConfirm)
    ));
    assert!(matches!(
        map(&state, &layout, key(KeyCode::Char('x'))),
        Some(Action::ContextMenuClose)
    ));
}

#[test]
fn left_click_on_body_clicks_row_and_column() {
    let (state, layout) = setup();
    let (x, _) = layout.columns[1];

    let action = map(&state, &layout, mouse(MouseEventKind::Down(MouseButton::Left), x, 3));
    assert!(matches!(
        action,
        Some(Action::ClickRow {
            row: 1,
            column: Some(1),
            ..
        })
    ));
}

#[test]
fn left_click_on_header_sorts() {
    let (state, layout) = setup();
    let (x, _) = layout.columns[0];

    assert!(matches!(
        map(&state, &layout, mouse(MouseEventKind::Down(MouseButton::Left), x, 1)),
        Some(Action::SortByColumn { column: 0 })
    ));
}

#[test]
fn right_click_opens_menu_at_pointer() {
    let (state, layout) = setup();
    assert!(matches!(
        map(&state, &layout, mouse(MouseEventKind::Down(MouseButton::Right), 5, 4)),
        Some(Action::ContextMenuOpen {
            row: Some(2),
            x: 5,
            y: 4
        })
    ));
    assert!(matches!(
        map(&state, &layout, mouse(MouseEventKind::Down(MouseButton::Right), 5, 9)),
        Some(Action::ContextMenuOpen { row: None, .. })
    ));
}

#[test]
fn wheel_scrolls_and_motion_hovers() {
    let (mut state, layout) = setup();
    assert!(matches!(
        map(&state, &layout, mouse(MouseEventKind::ScrollDown, 5, 5)),
        Some(Action::Scroll { delta: 3 })
    ));
    assert!(matches!(
        map(&state, &layout, mouse(MouseEventKind::Moved, 5, 2)),
        Some(Action::HoverRow { row: Some(0) })
    ));

    state.hover = Some(0);
    assert!(map(&state, &layout, mouse(MouseEventKind::Moved, 5, 2)).is_none());
}

#[test]
fn click_outside_open_menu_closes_it() {
    let (mut state, _) = setup();
    state.menu.visible = true;
    state.menu.anchor = (10, 5);
    state.menu.items = vec![
        crate::kernel::ContextMenuItem::AddRow,
        crate::kernel::ContextMenuItem::DeleteRow,
    ];
    let layout = ListLayout::compute(Rect::new(0, 0, 40, 12), &state);
    let menu = layout.menu.unwrap();

    assert!(matches!(
        map(
            &state,
            &layout,
            mouse(MouseEventKind::Down(MouseButton::Left), menu.x + 1, menu.y + 2)
        ),
        Some(Action::ContextMenuSelect { index: 1 })
    ));
    assert!(matches!(
        map(&state, &layout, mouse(MouseEventKind::Down(MouseButton::Left), 0, 0)),
        Some(Action::ContextMenuClose)
    ));
}
