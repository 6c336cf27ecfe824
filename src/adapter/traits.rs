//! DataSource trait — the contract data-source adapters implement
//!
//! A data source exposes named out-streams. The host wires its
//! collaborators in through `AdapterServices` rather than ambient globals.

use super::error::AdapterResult;
use super::registry::DataSourceDescriptor;
use super::stream::OutputStream;
use crate::config::SettingsProvider;
use crate::source::TabularSourceProvider;
use std::sync::Arc;

/// Collaborators a data source is constructed with.
#[derive(Clone)]
pub struct AdapterServices {
    pub settings: Arc<dyn SettingsProvider>,
    pub source: Arc<dyn TabularSourceProvider>,
}

impl AdapterServices {
    pub fn new(settings: Arc<dyn SettingsProvider>, source: Arc<dyn TabularSourceProvider>) -> Self {
        Self { settings, source }
    }
}

/// A pipeline component that produces entities on named out-streams.
pub trait DataSource: Send + Sync {
    /// Registration entry this data source was declared with.
    fn descriptor(&self) -> &'static DataSourceDescriptor;

    /// Short tag prefixed to this data source's log records.
    fn log_id(&self) -> &str;

    /// Look up an out-stream by name (case-insensitive).
    fn out(&self, name: &str) -> AdapterResult<&OutputStream>;

    /// Names of every out-stream, in registration order.
    fn stream_names(&self) -> Vec<&str>;
}
