//! Column schema of a list dialog.

use super::error::{DialogError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Text,
    Numeric,
    Checkbox,
    Image,
    Tooltip,
}

impl ColumnType {
    pub fn parse(value: &str) -> Option<Self> {
        let ty = match value.trim().to_ascii_uppercase().as_str() {
            "TEXT" => ColumnType::Text,
            "NUM" | "NUMERIC" => ColumnType::Numeric,
            "CHK" | "CHECK" | "CHECKBOX" => ColumnType::Checkbox,
            "IMG" | "IMAGE" => ColumnType::Image,
            "TIP" | "TOOLTIP" => ColumnType::Tooltip,
            _ => return None,
        };
        Some(ty)
    }

    /// Columns backed by a text renderer: sortable and editable in place.
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            ColumnType::Text | ColumnType::Numeric | ColumnType::Tooltip
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Parses `NAME[:TYPE]`.
    ///
    /// Only a purely alphabetic suffix is treated as a type, so titles such as
    /// `Time 12:30` or `URL:http://host` stay plain text columns.
    pub fn parse(arg: &str) -> Result<Self> {
        let Some((name, suffix)) = arg.rsplit_once(':') else {
            return Ok(Self::new(arg, ColumnType::Text));
        };

        if suffix.is_empty() || !suffix.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Ok(Self::new(arg, ColumnType::Text));
        }

        match ColumnType::parse(suffix) {
            Some(ty) => Ok(Self::new(name, ty)),
            None => Err(DialogError::InvalidColumnType {
                arg: arg.to_string(),
                ty: suffix.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Builds a schema; in checkbox mode the first column becomes a checkbox.
    pub fn new(mut columns: Vec<Column>, checkbox: bool) -> Result<Self> {
        let Some(first) = columns.first_mut() else {
            return Err(DialogError::NoColumns);
        };
        if checkbox {
            first.ty = ColumnType::Checkbox;
        }
        Ok(Self { columns })
    }

    pub fn parse<S: AsRef<str>>(args: &[S], checkbox: bool) -> Result<Self> {
        let columns = args
            .iter()
            .map(|arg| Column::parse(arg.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns, checkbox)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_type(&self, index: usize) -> Option<ColumnType> {
        self.columns.get(index).map(|c| c.ty)
    }

    /// First column whose type is exactly `Tooltip`.
    pub fn tooltip_column(&self) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.ty == ColumnType::Tooltip)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/schema.rs"]
mod tests;
