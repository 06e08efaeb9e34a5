use super::*;

#[test]
fn column_type_parses_short_and_long_forms() {
    assert_eq!(ColumnType::parse("TEXT"), Some(ColumnType::Text));
    assert_eq!(ColumnType::parse("num"), Some(ColumnType::Numeric));
    assert_eq!(ColumnType::parse("Numeric"), Some(ColumnType::Numeric));
    assert_eq!(ColumnType::parse("CHK"), Some(ColumnType::Checkbox));
    assert_eq!(ColumnType::parse("checkbox"), Some(ColumnType::Checkbox));
    assert_eq!(ColumnType::parse("IMG"), Some(ColumnType::Image));
    assert_eq!(ColumnType::parse("TIP"), Some(ColumnType::Tooltip));
    assert_eq!(ColumnType::parse("FLOAT"), None);
}

#[test]
fn column_without_suffix_is_text() {
    let column = Column::parse("Name").unwrap();
    assert_eq!(column, Column::new("Name", ColumnType::Text));
}

#[test]
fn column_suffix_sets_type_and_is_stripped_from_name() {
    let column = Column::parse("Size:NUM").unwrap();
    assert_eq!(column.name, "Size");
    assert_eq!(column.ty, ColumnType::Numeric);
}

#[test]
fn non_alphabetic_suffix_stays_in_the_name() {
    let column = Column::parse("Time 12:30").unwrap();
    assert_eq!(column.name, "Time 12:30");
    assert_eq!(column.ty, ColumnType::Text);

    let column = Column::parse("Trailing:").unwrap();
    assert_eq!(column.name, "Trailing:");
}

#[test]
fn unknown_alphabetic_suffix_is_rejected() {
    let err = Column::parse("Price:FLOAT").unwrap_err();
    assert!(matches!(
        err,
        DialogError::InvalidColumnType { ref ty, .. } if ty == "FLOAT"
    ));
    assert!(err.is_config());
}

#[test]
fn empty_schema_is_rejected() {
    let err = Schema::parse::<&str>(&[], false).unwrap_err();
    assert!(matches!(err, DialogError::NoColumns));
    assert_eq!(err.to_string(), "No column titles specified for List dialog.");
}

#[test]
fn checkbox_mode_forces_first_column_to_checkbox() {
    let schema = Schema::parse(&["Pick", "Name"], true).unwrap();
    assert_eq!(schema.column_type(0), Some(ColumnType::Checkbox));
    assert_eq!(schema.column_type(1), Some(ColumnType::Text));
    assert_eq!(schema.column(0).map(|c| c.name.as_str()), Some("Pick"));
}

#[test]
fn tooltip_column_is_first_exact_tooltip() {
    let schema = Schema::parse(&["Name", "Help:TIP", "More:TIP"], false).unwrap();
    assert_eq!(schema.tooltip_column(), Some(1));

    let schema = Schema::parse(&["Name", "Size:NUM"], false).unwrap();
    assert_eq!(schema.tooltip_column(), None);
}

#[test]
fn textual_columns_are_text_numeric_and_tooltip() {
    assert!(ColumnType::Text.is_textual());
    assert!(ColumnType::Numeric.is_textual());
    assert!(ColumnType::Tooltip.is_textual());
    assert!(!ColumnType::Checkbox.is_textual());
    assert!(!ColumnType::Image.is_textual());
}
