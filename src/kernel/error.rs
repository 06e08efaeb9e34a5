use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DialogError>;

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("No column titles specified for List dialog.")]
    NoColumns,

    #[error("invalid column type `{ty}` in column `{arg}` (expected TEXT, NUM, CHK, IMG or TIP)")]
    InvalidColumnType { arg: String, ty: String },

    #[error("print column {column} is out of range (dialog has {columns} columns)")]
    PrintColumnOutOfRange { column: usize, columns: usize },

    #[error("failed to parse settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DialogError {
    /// Configuration errors abort the dialog before anything is drawn.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            DialogError::NoColumns
                | DialogError::InvalidColumnType { .. }
                | DialogError::PrintColumnOutOfRange { .. }
        )
    }
}
