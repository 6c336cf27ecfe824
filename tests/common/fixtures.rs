//! Shared fixtures for adapter integration tests
//!
//! A counting tabular source (the fetch-once test double) and helpers for
//! building settings and datasets.

use fnl_source::{
    CellValue, FormAndListSource, InMemorySource, SourceError, StaticSettings, TabularDataset,
    TabularSourceProvider,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Route adapter logs to the test harness output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Tabular source that counts every fetch.
pub struct CountingSource {
    inner: InMemorySource,
    fetches: AtomicUsize,
}

impl CountingSource {
    pub fn new(inner: InMemorySource) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fetches: AtomicUsize::new(0),
        })
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl TabularSourceProvider for CountingSource {
    fn fetch(&self, id: i32) -> Result<TabularDataset, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(id)
    }

    fn identifier_column(&self) -> &str {
        self.inner.identifier_column()
    }
}

/// Settings with ModuleId / TitleFieldName / ContentTypeName.
pub fn settings(module_id: &str, title_field: &str, content_type: &str) -> StaticSettings {
    StaticSettings::new()
        .with("ModuleId", module_id)
        .with("TitleFieldName", title_field)
        .with("ContentTypeName", content_type)
}

/// Dataset from column names and rows of cells.
pub fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> TabularDataset {
    let mut ds = TabularDataset::new(columns.iter().copied());
    for row in rows {
        ds.push_row(row).expect("row width matches columns");
    }
    ds
}

/// Adapter over a counting source whose identifier column is `RowId`.
pub fn adapter_over(
    settings: StaticSettings,
    id: i32,
    dataset: TabularDataset,
) -> (FormAndListSource, Arc<CountingSource>) {
    let source = CountingSource::new(
        InMemorySource::new()
            .with_identifier_column("RowId")
            .with_dataset(id, dataset),
    );
    let adapter = FormAndListSource::new(Arc::new(settings), source.clone());
    (adapter, source)
}
