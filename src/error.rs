use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures that can occur while bringing the sales table into memory.
///
/// Both variants are fatal at startup: the dashboard never runs against a
/// partially loaded or partially normalized dataset. Filtering and
/// aggregation have no error path at all.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file is missing, unreadable, of an unsupported kind, or its
    /// framing (CSV records, JSON document, Parquet pages) is broken.
    #[error("cannot read data source {}: {reason}", path.display())]
    DataSource { path: PathBuf, reason: String },

    /// A required column is absent or a cell cannot be coerced to its type.
    #[error("schema error: {0}")]
    Schema(String),
}

impl DataError {
    pub fn source_error(path: &Path, reason: impl std::fmt::Display) -> Self {
        DataError::DataSource {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        DataError::Schema(message.into())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
