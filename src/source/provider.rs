//! TabularSourceProvider — the external service that owns the raw data

use super::dataset::TabularDataset;
use std::collections::HashMap;
use thiserror::Error;

/// Column every Form-and-List table carries as its row identifier.
pub const DEFAULT_IDENTIFIER_COLUMN: &str = "UserDefinedRowId";

/// Errors reported by a tabular source.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("no dataset for source {0}")]
    NotFound(i32),

    #[error("source backend error: {0}")]
    Backend(String),

    #[error("row has {actual} cells, expected {expected}")]
    RowWidth { expected: usize, actual: usize },

    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

/// Fetches raw tabular datasets by numeric identifier.
///
/// A fetch may be expensive or have side effects in the source system;
/// callers are expected to fetch at most once per pipeline run.
pub trait TabularSourceProvider: Send + Sync {
    /// Fetch the dataset stored under `id`.
    fn fetch(&self, id: i32) -> Result<TabularDataset, SourceError>;

    /// Name of the column holding row identifiers.
    fn identifier_column(&self) -> &str {
        DEFAULT_IDENTIFIER_COLUMN
    }
}

/// Datasets held in memory, keyed by source id.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    datasets: HashMap<i32, TabularDataset>,
    identifier_column: String,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self {
            datasets: HashMap::new(),
            identifier_column: DEFAULT_IDENTIFIER_COLUMN.to_string(),
        }
    }

    /// Use a different identifier column name.
    pub fn with_identifier_column(mut self, column: impl Into<String>) -> Self {
        self.identifier_column = column.into();
        self
    }

    pub fn with_dataset(mut self, id: i32, dataset: TabularDataset) -> Self {
        self.insert(id, dataset);
        self
    }

    pub fn insert(&mut self, id: i32, dataset: TabularDataset) {
        self.datasets.insert(id, dataset);
    }
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl TabularSourceProvider for InMemorySource {
    fn fetch(&self, id: i32) -> Result<TabularDataset, SourceError> {
        self.datasets.get(&id).cloned().ok_or(SourceError::NotFound(id))
    }

    fn identifier_column(&self) -> &str {
        &self.identifier_column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_returns_stored_dataset() {
        let ds = TabularDataset::new([DEFAULT_IDENTIFIER_COLUMN, "Name"]);
        let source = InMemorySource::new().with_dataset(3, ds.clone());
        assert_eq!(source.fetch(3).unwrap(), ds);
    }

    #[test]
    fn fetch_unknown_id_is_not_found() {
        let source = InMemorySource::new();
        assert!(matches!(source.fetch(99), Err(SourceError::NotFound(99))));
    }

    #[test]
    fn identifier_column_defaults_to_form_and_list_row_id() {
        assert_eq!(InMemorySource::new().identifier_column(), "UserDefinedRowId");
        assert_eq!(
            InMemorySource::new().with_identifier_column("RowId").identifier_column(),
            "RowId"
        );
    }
}
