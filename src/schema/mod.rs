//! Schema normalization for raw tabular data

mod normalize;

pub use normalize::{normalize, row_identifiers, sanitize_column_name, NormalizedSchema, SchemaError};
