//! Result printing: the dialog's final table state as separator-joined lines.

use std::io::{self, Write};

use super::cell::CellValue;
use super::error::{DialogError, Result};
use super::schema::{ColumnType, Schema};
use super::selection::RowSelection;
use super::table::{Row, Table};

pub const DEFAULT_SEPARATOR: &str = "|";

/// How the confirmed result is written.
///
/// `print_column` restricts output under every row policy, including
/// `print_all`. Older list dialogs printed every column with `--print-all`
/// regardless of `--print-column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub separator: String,
    /// 1-based column to print; 0 prints every column.
    pub print_column: usize,
    pub print_all: bool,
    pub checkbox: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            print_column: 0,
            print_all: false,
            checkbox: false,
        }
    }
}

impl PrintOptions {
    pub fn validate(&self, schema: &Schema) -> Result<()> {
        if self.print_column > schema.len() {
            return Err(DialogError::PrintColumnOutOfRange {
                column: self.print_column,
                columns: schema.len(),
            });
        }
        Ok(())
    }
}

/// Indices of the rows that qualify for output, in table order.
pub fn rows_to_print(table: &Table, selection: &RowSelection, opts: &PrintOptions) -> Vec<usize> {
    if opts.print_all {
        return (0..table.len()).collect();
    }

    if opts.checkbox {
        return table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_checked(0))
            .map(|(index, _)| index)
            .collect();
    }

    selection.indices(table)
}

/// Appends the textual form of one cell; image cells have none.
pub fn format_cell(ty: ColumnType, value: Option<&CellValue>, out: &mut String) {
    match (ty, value) {
        (_, Some(CellValue::Check(v))) => out.push_str(if *v { "TRUE" } else { "FALSE" }),
        (_, Some(CellValue::Numeric(v))) => out.push_str(&v.to_string()),
        (_, Some(CellValue::Text(v))) => out.push_str(v),
        (_, Some(CellValue::Image(_))) => {}
        (ColumnType::Checkbox, None) => out.push_str("FALSE"),
        (ColumnType::Numeric, None) => out.push('0'),
        (ColumnType::Text | ColumnType::Tooltip | ColumnType::Image, None) => {}
    }
}

pub fn format_row(schema: &Schema, row: &Row, opts: &PrintOptions, out: &mut String) {
    let mut push = |column: usize| {
        if let Some(ty) = schema.column_type(column) {
            format_cell(ty, row.cell(column), out);
            out.push_str(&opts.separator);
        }
    };

    if opts.print_column > 0 {
        push(opts.print_column - 1);
    } else {
        (0..schema.len()).for_each(&mut push);
    }
    out.push('\n');
}

pub fn render_result(table: &Table, selection: &RowSelection, opts: &PrintOptions) -> String {
    let mut out = String::new();
    for index in rows_to_print(table, selection, opts) {
        if let Some(row) = table.row(index) {
            format_row(table.schema(), row, opts, &mut out);
        }
    }
    out
}

pub fn print_result<W: Write>(
    w: &mut W,
    table: &Table,
    selection: &RowSelection,
    opts: &PrintOptions,
) -> io::Result<()> {
    let out = render_result(table, selection, opts);
    w.write_all(out.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/print.rs"]
mod tests;
