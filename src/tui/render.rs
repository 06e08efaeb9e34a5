use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::kernel::{CellEditor, CellValue, ColumnType, ListState, SortState};

use super::layout::{display_text, ListLayout};
use super::theme::UiTheme;

pub fn render(frame: &mut Frame, state: &ListState, theme: &UiTheme, layout: &ListLayout) {
    if layout.inner.width == 0 && layout.inner.height == 0 {
        return;
    }

    let block_area = Rect::new(
        layout.frame.x,
        layout.frame.y,
        layout.frame.width,
        layout.frame.height.saturating_sub(1),
    );
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted_fg));
    if let Some(title) = state.options.title.as_deref() {
        block = block
            .title(Span::styled(
                format!(" {title} "),
                Style::default().fg(theme.accent_fg),
            ))
            .title_alignment(Alignment::Center);
    }
    frame.render_widget(block, block_area);

    if let (Some(area), Some(text)) = (layout.text, state.options.text.as_deref()) {
        let lines: Vec<Line> = text.lines().map(Line::raw).collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    if let Some(area) = layout.header {
        render_header(frame, state, theme, layout, area);
    }
    render_rows(frame, state, theme, layout);
    render_status(frame, state, theme, layout);

    if let Some(area) = layout.menu {
        render_menu(frame, state, theme, area);
    }
}

fn render_header(
    frame: &mut Frame,
    state: &ListState,
    theme: &UiTheme,
    layout: &ListLayout,
    area: Rect,
) {
    let buf = frame.buffer_mut();
    let base = Style::default()
        .fg(theme.header_fg)
        .add_modifier(Modifier::BOLD);

    for (index, column) in state.table.schema().columns().iter().enumerate() {
        let Some(&(x, width)) = layout.columns.get(index) else {
            continue;
        };
        if width == 0 {
            continue;
        }

        let marker = match state.sort {
            Some(SortState { column: c, descending }) if c == index => {
                if descending {
                    " ▼"
                } else {
                    " ▲"
                }
            }
            _ => "",
        };
        let style = if index == state.column {
            base.add_modifier(Modifier::UNDERLINED)
        } else {
            base
        };
        buf.set_stringn(
            x,
            area.y,
            format!("{}{marker}", column.name),
            width as usize,
            style,
        );
    }
}

fn render_rows(frame: &mut Frame, state: &ListState, theme: &UiTheme, layout: &ListLayout) {
    let body = layout.body;
    let schema = state.table.schema();
    let buf = frame.buffer_mut();

    for line in 0..body.height {
        let index = state.offset + line as usize;
        let Some(row) = state.table.row(index) else {
            break;
        };
        let y = body.y + line;

        let selected = state.selection.is_selected(row.id());
        let is_cursor = state.cursor == Some(index);

        let mut row_style = Style::default();
        if state.options.rules_hint && index % 2 == 1 {
            row_style = row_style.bg(theme.rule_bg);
        }
        if selected {
            row_style = row_style.bg(theme.selected_bg).fg(theme.selected_fg);
        }
        if state.hover == Some(index) {
            row_style = row_style.add_modifier(Modifier::ITALIC);
        }
        buf.set_style(Rect::new(body.x, y, body.width, 1), row_style);

        if is_cursor {
            buf.set_string(
                body.x,
                y,
                "▸",
                row_style.fg(theme.cursor_fg).add_modifier(Modifier::BOLD),
            );
        }

        for (column, descriptor) in schema.columns().iter().enumerate() {
            let Some(&(x, width)) = layout.columns.get(column) else {
                continue;
            };
            if width == 0 {
                continue;
            }

            let editing = state
                .editor
                .as_ref()
                .filter(|e| e.row == row.id() && e.column == column);
            if let Some(editor) = editing {
                render_editor(buf, editor, x, y, width, theme);
                continue;
            }

            let value = row.cell(column);
            let text = display_text(descriptor.ty, value);
            let mut style = row_style;
            if is_cursor && column == state.column {
                style = style.add_modifier(Modifier::REVERSED);
            }
            if let Some(CellValue::Image(handle)) = value {
                if let Some((r, g, b)) = handle.average_rgb() {
                    style = style.fg(Color::Rgb(r, g, b));
                } else {
                    style = style.fg(theme.muted_fg);
                }
            }

            let x = if descriptor.ty == ColumnType::Numeric {
                x + width.saturating_sub(text.width() as u16)
            } else {
                x
            };
            buf.set_stringn(x, y, &text, width as usize, style);
        }
    }
}

fn render_editor(
    buf: &mut ratatui::buffer::Buffer,
    editor: &CellEditor,
    x: u16,
    y: u16,
    width: u16,
    theme: &UiTheme,
) {
    let style = Style::default().fg(theme.accent_fg);
    let before = &editor.buffer[..editor.cursor];
    let mut rest = editor.buffer[editor.cursor..].chars();
    let at = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
    let after: String = rest.collect();

    let line = Line::from(vec![
        Span::styled(before.to_string(), style),
        Span::styled(at, style.add_modifier(Modifier::REVERSED)),
        Span::styled(after, style),
    ]);
    buf.set_style(Rect::new(x, y, width, 1), Style::default());
    buf.set_line(x, y, &line, width);
}

fn render_status(frame: &mut Frame, state: &ListState, theme: &UiTheme, layout: &ListLayout) {
    let area = layout.status;
    if area.height == 0 {
        return;
    }

    let mut left = vec![Span::raw(format!(" {} rows", state.table.len()))];
    if state.options.checkbox {
        let checked = state
            .table
            .rows()
            .iter()
            .filter(|row| row.is_checked(0))
            .count();
        left.push(Span::raw(format!(" · {checked} checked")));
    } else if !state.selection.is_empty() {
        left.push(Span::raw(format!(" · {} selected", state.selection.len())));
    }
    if state.streaming {
        left.push(Span::styled(
            " · reading stdin…",
            Style::default().fg(theme.accent_fg),
        ));
    }
    if let Some(status) = state.status.as_deref() {
        left.push(Span::styled(
            format!(" · {status}"),
            Style::default().fg(theme.error_fg),
        ));
    } else if let Some(tip) = state.tooltip() {
        left.push(Span::styled(
            format!(" · {tip}"),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }

    let hints = if state.editor.is_some() {
        "Enter save  Esc discard "
    } else if state.options.editable {
        "Enter OK  Esc cancel  F2 edit  m menu "
    } else {
        "Enter OK  Esc cancel "
    };

    frame.render_widget(Paragraph::new(Line::from(left)), area);
    let hints_width = (hints.width() as u16).min(area.width);
    let hints_area = Rect::new(area.right() - hints_width, area.y, hints_width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(theme.muted_fg))),
        hints_area,
    );
}

fn render_menu(frame: &mut Frame, state: &ListState, theme: &UiTheme, area: Rect) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent_fg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = state
        .menu
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let style = if index == state.menu.selected {
                Style::default()
                    .bg(theme.selected_bg)
                    .fg(theme.selected_fg)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {} ", item.label()), style))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
#[path = "../../tests/unit/tui/render.rs"]
mod tests;
