//! Tabular data sources

mod dataset;
mod provider;

pub use dataset::{CellValue, TabularDataset};
pub use provider::{InMemorySource, SourceError, TabularSourceProvider, DEFAULT_IDENTIFIER_COLUMN};
