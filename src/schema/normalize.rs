//! Column sanitization and title resolution
//!
//! Templates address attributes by column name, so names must not contain
//! whitespace. Sanitizing may never merge two columns into one.

use crate::source::TabularDataset;
use std::collections::HashSet;
use thiserror::Error;

/// Errors from deriving a schema out of a raw dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("column names collide after sanitizing: {column}")]
    DuplicateColumn { column: String },

    #[error("column {index} has no name after sanitizing")]
    EmptyColumnName { index: usize },

    #[error("title field '{field}' is not a column of the dataset")]
    UnknownTitleField { field: String },

    #[error("dataset has {count} column(s); a title column needs at least two")]
    InsufficientColumns { count: usize },

    #[error("identifier column '{column}' is missing")]
    MissingIdentifierColumn { column: String },

    #[error("row {row}: identifier '{value}' is not an integer")]
    InvalidIdentifierValue { row: usize, value: String },

    #[error("row {row}: identifier {id} already used by an earlier row")]
    DuplicateIdentifierValue { row: usize, id: i64 },
}

/// Remove every whitespace character from a column name.
pub fn sanitize_column_name(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// The schema entities are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSchema {
    columns: Vec<String>,
    identifier_index: usize,
    title_index: usize,
}

impl NormalizedSchema {
    /// Sanitized column names, in dataset order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn identifier_column(&self) -> &str {
        &self.columns[self.identifier_index]
    }

    pub fn identifier_index(&self) -> usize {
        self.identifier_index
    }

    pub fn title_column(&self) -> &str {
        &self.columns[self.title_index]
    }

    pub fn title_index(&self) -> usize {
        self.title_index
    }

    /// Attribute columns: everything except the identifier, with positions.
    pub fn attribute_columns(&self) -> impl Iterator<Item = (usize, &str)> {
        let id = self.identifier_index;
        self.columns
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != id)
            .map(|(i, c)| (i, c.as_str()))
    }
}

/// Derive the normalized schema of `dataset`.
///
/// `identifier_column` is the provider's row-id column. A non-blank
/// `title_field` must name a sanitized column; a blank one selects the
/// first column that is not the identifier.
pub fn normalize(
    dataset: &TabularDataset,
    identifier_column: &str,
    title_field: &str,
) -> Result<NormalizedSchema, SchemaError> {
    let mut columns = Vec::with_capacity(dataset.column_count());
    let mut seen = HashSet::with_capacity(dataset.column_count());

    for (index, raw) in dataset.columns().iter().enumerate() {
        let clean = sanitize_column_name(raw);
        if clean.is_empty() {
            return Err(SchemaError::EmptyColumnName { index });
        }
        if !seen.insert(clean.clone()) {
            return Err(SchemaError::DuplicateColumn { column: clean });
        }
        columns.push(clean);
    }

    let wanted_id = sanitize_column_name(identifier_column);
    let identifier_index = columns
        .iter()
        .position(|c| *c == wanted_id)
        .ok_or_else(|| SchemaError::MissingIdentifierColumn {
            column: identifier_column.to_string(),
        })?;

    let title_field = title_field.trim();
    let title_index = if title_field.is_empty() {
        (0..columns.len())
            .find(|i| *i != identifier_index)
            .ok_or(SchemaError::InsufficientColumns {
                count: columns.len(),
            })?
    } else {
        columns
            .iter()
            .position(|c| c == title_field)
            .ok_or_else(|| SchemaError::UnknownTitleField {
                field: title_field.to_string(),
            })?
    };

    Ok(NormalizedSchema {
        columns,
        identifier_index,
        title_index,
    })
}

/// Convert the identifier cell of every row, rejecting bad or repeated ids.
///
/// Runs over the whole dataset so a bad row fails before any entity exists.
pub fn row_identifiers(
    dataset: &TabularDataset,
    schema: &NormalizedSchema,
) -> Result<Vec<i64>, SchemaError> {
    let idx = schema.identifier_index();
    let mut seen = HashSet::with_capacity(dataset.row_count());
    let mut ids = Vec::with_capacity(dataset.row_count());

    for (row, cells) in dataset.rows().iter().enumerate() {
        let cell = &cells[idx];
        let id = cell
            .as_identifier()
            .ok_or_else(|| SchemaError::InvalidIdentifierValue {
                row,
                value: cell.to_string(),
            })?;
        if !seen.insert(id) {
            return Err(SchemaError::DuplicateIdentifierValue { row, id });
        }
        ids.push(id);
    }

    Ok(ids)
}
