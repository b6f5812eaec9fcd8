use std::path::PathBuf;

use thiserror::Error;

/// Result type for every fallible [`super::TableStore`] operation.
pub type TableResult<T> = Result<T, TableError>;

/// Everything that can go wrong while opening or mutating a table.
///
/// Validation errors are raised before any state is touched, so when one
/// of them comes back both the in-memory table and the backing file are
/// exactly as they were before the call.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("does not exist: file {}; no initial columns given", .path.display())]
    NotFound { path: PathBuf },

    #[error("schema mismatch: missing {missing:?}, unexpected {unexpected:?}")]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("out of range: row index {index}")]
    IndexOutOfRange { index: usize },

    #[error("empty table: no rows to update")]
    EmptyTable,

    #[error("invalid column {column}: does not exist")]
    KeyNotFound { column: String },

    #[error("malformed file on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TableError {
    pub(crate) fn key_not_found(column: &str) -> TableError {
        TableError::KeyNotFound {
            column: column.to_string(),
        }
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> TableError {
        TableError::Malformed {
            line,
            reason: reason.into(),
        }
    }
}
