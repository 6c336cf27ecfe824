//! Adapter-level errors

use crate::config::ConfigurationError;
use crate::schema::SchemaError;
use crate::source::SourceError;
use thiserror::Error;

/// Errors surfaced to whoever reads an adapter's output.
///
/// Nothing is retried inside the adapter; the host decides what to do.
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("source {id} unavailable: {source}")]
    SourceUnavailable {
        id: i32,
        #[source]
        source: SourceError,
    },

    #[error("unknown out-stream: {0}")]
    UnknownStream(String),

    #[error("unknown data source: {0}")]
    UnknownDataSource(String),
}

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
