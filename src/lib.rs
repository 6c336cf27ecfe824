//! fnl-source: Form-and-List Data Source Adapter
//!
//! Exposes rows of an external tabular source as content-typed entities on
//! a named out-stream, ready for a query/templating pipeline.
//!
//! # Core Concepts
//!
//! - **Config masks**: configuration declared as `[Settings:Key||default]`
//!   tokens, resolved once against injected settings providers
//! - **Tabular sources**: opaque services returning a dataset for a numeric id
//! - **Normalization**: column names lose their whitespace; a title column is
//!   picked from configuration or defaults to the first non-identifier column
//! - **Out-streams**: lazy, restartable entity sequences backed by a single
//!   cached fetch per adapter
//!
//! # Example
//!
//! ```
//! use fnl_source::{CellValue, FormAndListSource, InMemorySource, StaticSettings, TabularDataset};
//! use std::sync::Arc;
//!
//! let table = TabularDataset::new(["UserDefinedRowId", "Full Name"])
//!     .with_row([CellValue::Int(1), CellValue::from("Ann")])
//!     .unwrap();
//! let source = InMemorySource::new().with_dataset(5, table);
//! let settings = StaticSettings::new().with("ModuleId", "5");
//!
//! let adapter = FormAndListSource::new(Arc::new(settings), Arc::new(source));
//! let entities = adapter.list().unwrap();
//! assert_eq!(entities[0].title_text(), "Ann");
//! assert_eq!(entities[0].content_type, "FnL");
//! ```

pub mod adapter;
pub mod config;
mod entity;
pub mod schema;
pub mod source;

pub use adapter::{
    registry, AdapterError, AdapterResult, AdapterServices, DataSource, DataSourceDescriptor,
    DataSourceKind, Entities, FormAndListSource, OutputStream, DEFAULT_STREAM,
};
pub use config::{ConfigurationError, ConfigurationResolver, SettingsProvider, StaticSettings};
pub use entity::Entity;
pub use schema::{NormalizedSchema, SchemaError};
pub use source::{CellValue, InMemorySource, SourceError, TabularDataset, TabularSourceProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
