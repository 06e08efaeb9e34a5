//! Typed cell values and the coercion shared by ingestion and editing.

use std::cmp::Ordering;

use super::image::{ImageHandle, ImageLoader};
use super::schema::ColumnType;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Numeric(i64),
    Check(bool),
    Image(ImageHandle),
}

impl CellValue {
    /// Converts one raw field into the value its column stores.
    pub fn coerce(ty: ColumnType, raw: &str, images: &dyn ImageLoader) -> Self {
        match ty {
            ColumnType::Checkbox => CellValue::Check(parse_bool(raw)),
            ColumnType::Numeric => CellValue::Numeric(parse_numeric(raw)),
            ColumnType::Image => CellValue::Image(images.load(raw)),
            ColumnType::Text | ColumnType::Tooltip => CellValue::Text(raw.to_string()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Check(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageHandle> {
        match self {
            CellValue::Image(v) => Some(v),
            _ => None,
        }
    }
}

/// `"true"` in any ASCII case is true, everything else is false.
pub fn parse_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Base-10 parse with C `strtoll` semantics.
///
/// Leading ASCII whitespace is skipped, an optional sign is honored and the
/// longest run of digits is used. Text without digits yields 0 and values
/// outside the `i64` range saturate.
pub fn parse_numeric(raw: &str) -> i64 {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }

    let mut negative = false;
    if let Some(&sign) = bytes.get(i) {
        if sign == b'-' || sign == b'+' {
            negative = sign == b'-';
            i += 1;
        }
    }

    let mut value: i64 = 0;
    while let Some(&b) = bytes.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        let digit = i64::from(b - b'0');
        let next = value
            .checked_mul(10)
            .and_then(|v| if negative { v.checked_sub(digit) } else { v.checked_add(digit) });
        match next {
            Some(v) => value = v,
            None => return if negative { i64::MIN } else { i64::MAX },
        }
        i += 1;
    }

    value
}

/// Editable text for a cell, used to seed the inline editor.
pub fn edit_text(value: Option<&CellValue>) -> String {
    match value {
        Some(CellValue::Text(v)) => v.clone(),
        Some(CellValue::Numeric(v)) => v.to_string(),
        Some(CellValue::Check(v)) => if *v { "TRUE" } else { "FALSE" }.to_string(),
        Some(CellValue::Image(handle)) => handle.source().to_string(),
        None => String::new(),
    }
}

/// Orders two cells of the same column; unset cells sort as the column default.
pub fn compare(ty: ColumnType, a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match ty {
        ColumnType::Numeric => {
            let a = a.and_then(CellValue::as_i64).unwrap_or(0);
            let b = b.and_then(CellValue::as_i64).unwrap_or(0);
            a.cmp(&b)
        }
        ColumnType::Checkbox => {
            let a = a.and_then(CellValue::as_bool).unwrap_or(false);
            let b = b.and_then(CellValue::as_bool).unwrap_or(false);
            a.cmp(&b)
        }
        ColumnType::Text | ColumnType::Tooltip => {
            let a = a.and_then(CellValue::as_text).unwrap_or("");
            let b = b.and_then(CellValue::as_text).unwrap_or("");
            a.cmp(b)
        }
        ColumnType::Image => {
            let a = a.and_then(CellValue::as_image).map(ImageHandle::source);
            let b = b.and_then(CellValue::as_image).map(ImageHandle::source);
            a.cmp(&b)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/cell.rs"]
mod tests;
