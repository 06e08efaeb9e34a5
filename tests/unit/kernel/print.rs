use super::*;
use crate::kernel::selection::SelectionMode;

fn text(v: &str) -> CellValue {
    CellValue::Text(v.to_string())
}

fn checklist() -> Table {
    let mut table = Table::new(Schema::parse(&["Pick", "Name"], true).unwrap());
    table.append_values(vec![CellValue::Check(true), text("Alice")]);
    table.append_values(vec![CellValue::Check(false), text("Bob")]);
    table.append_values(vec![CellValue::Check(true), text("Carol")]);
    table
}

fn checklist_opts() -> PrintOptions {
    PrintOptions {
        checkbox: true,
        ..PrintOptions::default()
    }
}

#[test]
fn checked_rows_print_with_trailing_separator() {
    let table = checklist();
    let selection = RowSelection::new(SelectionMode::Single);

    let out = render_result(&table, &selection, &checklist_opts());
    assert_eq!(out, "TRUE|Alice|\nTRUE|Carol|\n");
}

#[test]
fn checkbox_mode_ignores_selection() {
    let table = checklist();
    let mut selection = RowSelection::new(SelectionMode::Single);
    selection.select_only(table.row(1).unwrap().id());

    let out = render_result(&table, &selection, &checklist_opts());
    assert_eq!(out.lines().count(), 2);
    assert!(!out.contains("Bob"));
}

#[test]
fn print_column_prints_one_field_per_row() {
    let table = checklist();
    let selection = RowSelection::new(SelectionMode::Single);
    let opts = PrintOptions {
        print_column: 2,
        ..checklist_opts()
    };

    assert_eq!(render_result(&table, &selection, &opts), "Alice|\nCarol|\n");
}

#[test]
fn print_all_prints_every_row_in_order() {
    let table = checklist();
    let selection = RowSelection::new(SelectionMode::Single);
    let opts = PrintOptions {
        print_all: true,
        separator: "\t".to_string(),
        ..checklist_opts()
    };

    assert_eq!(
        render_result(&table, &selection, &opts),
        "TRUE\tAlice\t\nFALSE\tBob\t\nTRUE\tCarol\t\n"
    );
}

#[test]
fn print_column_still_applies_with_print_all() {
    let table = checklist();
    let selection = RowSelection::new(SelectionMode::Single);
    let opts = PrintOptions {
        print_all: true,
        print_column: 2,
        ..checklist_opts()
    };

    assert_eq!(
        render_result(&table, &selection, &opts),
        "Alice|\nBob|\nCarol|\n"
    );
}

#[test]
fn selected_rows_print_in_table_order() {
    let mut table = Table::new(Schema::parse(&["Name", "Size:NUM"], false).unwrap());
    table.append_values(vec![text("a"), CellValue::Numeric(1)]);
    table.append_values(vec![text("b"), CellValue::Numeric(2)]);
    table.append_values(vec![text("c"), CellValue::Numeric(3)]);

    let mut selection = RowSelection::new(SelectionMode::Multiple);
    selection.extend_with(table.row(2).unwrap().id());
    selection.extend_with(table.row(0).unwrap().id());

    let out = render_result(&table, &selection, &PrintOptions::default());
    assert_eq!(out, "a|1|\nc|3|\n");
}

#[test]
fn nothing_selected_prints_nothing() {
    let table = checklist();
    let selection = RowSelection::new(SelectionMode::Single);
    let out = render_result(&table, &selection, &PrintOptions::default());
    assert!(out.is_empty());
}

#[test]
fn unset_and_image_cells_print_defaults() {
    let mut table = Table::new(
        Schema::parse(&["Done:CHK", "Count:NUM", "Name", "Icon:IMG"], false).unwrap(),
    );
    table.append_empty();
    table.append_values(vec![
        CellValue::Check(true),
        CellValue::Numeric(-4),
        text("x"),
        CellValue::Image(crate::kernel::image::ImageHandle::missing("folder")),
    ]);
    let selection = RowSelection::new(SelectionMode::Single);
    let opts = PrintOptions {
        print_all: true,
        ..PrintOptions::default()
    };

    assert_eq!(
        render_result(&table, &selection, &opts),
        "FALSE|0|||\nTRUE|-4|x||\n"
    );
}

#[test]
fn validate_rejects_print_column_past_schema() {
    let schema = Schema::parse(&["A", "B"], false).unwrap();
    let ok = PrintOptions {
        print_column: 2,
        ..PrintOptions::default()
    };
    assert!(ok.validate(&schema).is_ok());

    let bad = PrintOptions {
        print_column: 3,
        ..PrintOptions::default()
    };
    let err = bad.validate(&schema).unwrap_err();
    assert!(matches!(
        err,
        DialogError::PrintColumnOutOfRange {
            column: 3,
            columns: 2
        }
    ));
}

#[test]
fn print_result_writes_rendered_rows() {
    let table = checklist();
    let selection = RowSelection::new(SelectionMode::Single);
    let mut out = Vec::new();

    print_result(&mut out, &table, &selection, &checklist_opts()).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "TRUE|Alice|\nTRUE|Carol|\n");
}
