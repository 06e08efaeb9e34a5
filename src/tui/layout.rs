//! Screen geometry of the list dialog, shared by rendering and mouse hit-testing.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::kernel::{CellValue, ColumnType, ListState};

/// Width of the cursor marker in front of every row.
pub const GUTTER_WIDTH: u16 = 2;
pub const COLUMN_SPACING: u16 = 1;
const MIN_COLUMN_WIDTH: u16 = 3;
const MAX_COLUMN_WIDTH: u16 = 40;
const IMAGE_SWATCH: &str = "██";
const IMAGE_MISSING: &str = "··";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListLayout {
    pub frame: Rect,
    pub inner: Rect,
    pub text: Option<Rect>,
    pub header: Option<Rect>,
    pub body: Rect,
    pub status: Rect,
    /// Absolute `(x, width)` of every schema column; zero width when clipped.
    pub columns: Vec<(u16, u16)>,
    pub menu: Option<Rect>,
}

/// Text a cell shows in the grid. Unset cells show their column default.
pub fn display_text(ty: ColumnType, value: Option<&CellValue>) -> String {
    match (ty, value) {
        (_, Some(CellValue::Check(true))) => "[x]".to_string(),
        (_, Some(CellValue::Check(false))) | (ColumnType::Checkbox, None) => "[ ]".to_string(),
        (_, Some(CellValue::Numeric(v))) => v.to_string(),
        (ColumnType::Numeric, None) => "0".to_string(),
        (_, Some(CellValue::Text(v))) => v.replace(['\n', '\t'], " "),
        (_, Some(CellValue::Image(handle))) => {
            if handle.is_loaded() {
                IMAGE_SWATCH.to_string()
            } else {
                IMAGE_MISSING.to_string()
            }
        }
        (ColumnType::Text | ColumnType::Tooltip | ColumnType::Image, None) => String::new(),
    }
}

impl ListLayout {
    pub fn compute(area: Rect, state: &ListState) -> Self {
        let mut layout = ListLayout {
            frame: area,
            ..Default::default()
        };
        if area.width < 4 || area.height < 3 {
            return layout;
        }

        let block = Rect::new(area.x, area.y, area.width, area.height - 1);
        layout.status = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        layout.inner = Rect::new(
            block.x + 1,
            block.y + 1,
            block.width.saturating_sub(2),
            block.height.saturating_sub(2),
        );

        let mut y = layout.inner.y;
        let mut remaining = layout.inner.height;

        if let Some(text) = state.options.text.as_deref() {
            let lines = (text.lines().count().max(1) as u16).min(remaining / 2);
            if lines > 0 {
                layout.text = Some(Rect::new(layout.inner.x, y, layout.inner.width, lines));
                y += lines;
                remaining -= lines;
            }
        }

        if state.options.headers && remaining > 0 {
            layout.header = Some(Rect::new(layout.inner.x, y, layout.inner.width, 1));
            y += 1;
            remaining -= 1;
        }

        layout.body = Rect::new(layout.inner.x, y, layout.inner.width, remaining);
        layout.columns = column_spans(&layout, state);
        layout.menu = menu_rect(area, state);
        layout
    }

    pub fn body_height(&self) -> usize {
        self.body.height as usize
    }

    pub fn row_at(&self, state: &ListState, x: u16, y: u16) -> Option<usize> {
        if !contains(self.body, x, y) {
            return None;
        }
        let index = state.offset + (y - self.body.y) as usize;
        (index < state.table.len()).then_some(index)
    }

    pub fn column_at(&self, x: u16) -> Option<usize> {
        self.columns
            .iter()
            .position(|&(cx, width)| width > 0 && x >= cx && x < cx + width)
    }

    pub fn header_column_at(&self, x: u16, y: u16) -> Option<usize> {
        let header = self.header?;
        if !contains(header, x, y) {
            return None;
        }
        self.column_at(x)
    }

    pub fn menu_item_at(&self, x: u16, y: u16) -> Option<usize> {
        let menu = self.menu?;
        let inside = Rect::new(
            menu.x + 1,
            menu.y + 1,
            menu.width.saturating_sub(2),
            menu.height.saturating_sub(2),
        );
        contains(inside, x, y).then(|| (y - inside.y) as usize)
    }

    pub fn in_menu(&self, x: u16, y: u16) -> bool {
        self.menu.is_some_and(|menu| contains(menu, x, y))
    }
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
}

fn column_spans(layout: &ListLayout, state: &ListState) -> Vec<(u16, u16)> {
    let schema = state.table.schema();
    let visible = state.offset..(state.offset + layout.body_height()).min(state.table.len());

    let mut spans = Vec::with_capacity(schema.len());
    let mut x = layout.inner.x + GUTTER_WIDTH;
    let right = layout.inner.right();

    for (index, column) in schema.columns().iter().enumerate() {
        let mut width = if state.options.headers {
            column.name.width() as u16
        } else {
            0
        };
        for row in visible.clone() {
            let text = display_text(column.ty, state.table.cell(row, index));
            width = width.max(text.width().min(u16::MAX as usize) as u16);
        }
        if let Some(editor) = state.editor.as_ref().filter(|e| e.column == index) {
            width = width.max(editor.buffer.width() as u16 + 1);
        }
        let width = width.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);

        let available = right.saturating_sub(x);
        let width = width.min(available);
        spans.push((x, width));
        x = x.saturating_add(width + COLUMN_SPACING).min(right);
    }

    spans
}

fn menu_rect(area: Rect, state: &ListState) -> Option<Rect> {
    if !state.menu.visible || state.menu.items.is_empty() {
        return None;
    }
    let label_width = state
        .menu
        .items
        .iter()
        .map(|item| item.label().width())
        .max()
        .unwrap_or(0) as u16;
    let width = (label_width + 4).min(area.width);
    let height = (state.menu.items.len() as u16 + 2).min(area.height);

    let (ax, ay) = state.menu.anchor;
    let x = ax.min(area.right().saturating_sub(width)).max(area.x);
    let y = ay
        .saturating_add(1)
        .min(area.bottom().saturating_sub(height))
        .max(area.y);
    Some(Rect::new(x, y, width, height))
}

#[cfg(test)]
#[path = "../../tests/unit/tui/layout.rs"]
mod tests;
