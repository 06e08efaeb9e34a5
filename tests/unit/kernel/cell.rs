use super::*;

struct NoImages;

impl ImageLoader for NoImages {
    fn load(&self, source: &str) -> ImageHandle {
        ImageHandle::missing(source)
    }
}

#[test]
fn parse_bool_accepts_true_in_any_case() {
    assert!(parse_bool("true"));
    assert!(parse_bool("TRUE"));
    assert!(parse_bool("TrUe"));
    assert!(!parse_bool("yes"));
    assert!(!parse_bool("1"));
    assert!(!parse_bool(" true"));
    assert!(!parse_bool(""));
}

#[test]
fn parse_numeric_follows_strtoll() {
    assert_eq!(parse_numeric("42"), 42);
    assert_eq!(parse_numeric("  -7"), -7);
    assert_eq!(parse_numeric("+5"), 5);
    assert_eq!(parse_numeric("12abc"), 12);
    assert_eq!(parse_numeric("abc"), 0);
    assert_eq!(parse_numeric(""), 0);
    assert_eq!(parse_numeric("-"), 0);
    assert_eq!(parse_numeric("3.9"), 3);
}

#[test]
fn parse_numeric_saturates_out_of_range() {
    assert_eq!(parse_numeric("99999999999999999999"), i64::MAX);
    assert_eq!(parse_numeric("-99999999999999999999"), i64::MIN);
    assert_eq!(parse_numeric("-9223372036854775808"), i64::MIN);
}

#[test]
fn coerce_follows_column_type() {
    let images = NoImages;
    assert_eq!(
        CellValue::coerce(ColumnType::Checkbox, "TRUE", &images),
        CellValue::Check(true)
    );
    assert_eq!(
        CellValue::coerce(ColumnType::Numeric, "12abc", &images),
        CellValue::Numeric(12)
    );
    assert_eq!(
        CellValue::coerce(ColumnType::Tooltip, "hint", &images),
        CellValue::Text("hint".to_string())
    );
    let image = CellValue::coerce(ColumnType::Image, "folder", &images);
    assert_eq!(image.as_image().map(ImageHandle::source), Some("folder"));
}

#[test]
fn edit_text_seeds_editor_from_cell() {
    assert_eq!(edit_text(Some(&CellValue::Text("abc".into()))), "abc");
    assert_eq!(edit_text(Some(&CellValue::Numeric(-3))), "-3");
    assert_eq!(edit_text(Some(&CellValue::Check(true))), "TRUE");
    assert_eq!(edit_text(None), "");
}

#[test]
fn compare_treats_unset_as_column_default() {
    use std::cmp::Ordering;

    let five = CellValue::Numeric(5);
    assert_eq!(compare(ColumnType::Numeric, None, Some(&five)), Ordering::Less);
    assert_eq!(
        compare(ColumnType::Numeric, Some(&CellValue::Numeric(0)), None),
        Ordering::Equal
    );

    let b = CellValue::Text("b".into());
    assert_eq!(compare(ColumnType::Text, None, Some(&b)), Ordering::Less);
    assert_eq!(
        compare(ColumnType::Checkbox, Some(&CellValue::Check(true)), None),
        Ordering::Greater
    );
}
