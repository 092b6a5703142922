//! Error types for loading the innovation dataset.

use thiserror::Error;

/// Failure of a whole load operation. There is no partial result.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The raw document could not be retrieved.
    #[error("failed to fetch '{source_name}': {reason}")]
    Fetch { source_name: String, reason: String },

    /// A required column is missing from the header row.
    #[error("required column(s) not found in CSV: {}", missing.join(", "))]
    Schema { missing: Vec<String> },
}

impl LoadError {
    pub(crate) fn fetch(source_name: impl Into<String>, reason: impl ToString) -> Self {
        LoadError::Fetch {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, LoadError::Fetch { .. })
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, LoadError::Schema { .. })
    }
}

/// Result alias used by the loading pipeline.
pub type LoadResult<T> = Result<T, LoadError>;
