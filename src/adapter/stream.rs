//! Output streams — named channels consumers pull entities from
//!
//! A stream is bound to a producer at adapter construction. Reading a
//! stream never refetches: every read re-maps the producer's cached data.

use super::error::AdapterResult;
use crate::entity::Entity;
use crate::schema::{row_identifiers, NormalizedSchema, SchemaError};
use crate::source::TabularDataset;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Name of the stream every data source provides.
pub const DEFAULT_STREAM: &str = "Default";

/// Something that can hand out a fresh entity sequence on demand.
pub trait EntityProducer: Send + Sync {
    /// Start a new pass over the entities.
    fn produce(&self) -> AdapterResult<Entities>;
}

/// A fetched dataset together with everything needed to build entities.
#[derive(Debug, Clone)]
pub struct NormalizedDataset {
    dataset: TabularDataset,
    schema: NormalizedSchema,
    ids: Vec<i64>,
    content_type: String,
}

impl NormalizedDataset {
    /// Pair a dataset with its schema, validating every row identifier.
    pub fn new(
        dataset: TabularDataset,
        schema: NormalizedSchema,
        content_type: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        let ids = row_identifiers(&dataset, &schema)?;
        Ok(Self {
            dataset,
            schema,
            ids,
            content_type: content_type.into(),
        })
    }

    pub fn schema(&self) -> &NormalizedSchema {
        &self.schema
    }

    /// The dataset as fetched; column names here are unsanitized.
    pub fn dataset(&self) -> &TabularDataset {
        &self.dataset
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Build the entity for row `index`.
    pub fn entity(&self, index: usize) -> Option<Entity> {
        let id = *self.ids.get(index)?;
        let row = &self.dataset.rows()[index];

        let attributes: IndexMap<String, _> = self
            .schema
            .attribute_columns()
            .map(|(i, name)| (name.to_string(), row[i].clone()))
            .collect();

        Some(Entity {
            id,
            content_type: self.content_type.clone(),
            title_field: self.schema.title_column().to_string(),
            title: row[self.schema.title_index()].clone(),
            attributes,
        })
    }
}

/// Lazy pass over a normalized dataset.
///
/// Holds its own reference to the cached data, so it outlives the stream
/// it came from.
#[derive(Debug, Clone)]
pub struct Entities {
    data: Arc<NormalizedDataset>,
    next: usize,
}

impl Entities {
    pub fn new(data: Arc<NormalizedDataset>) -> Self {
        Self { data, next: 0 }
    }
}

impl Iterator for Entities {
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        let entity = self.data.entity(self.next)?;
        self.next += 1;
        Some(entity)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Entities {}

/// A named channel bound to an entity producer.
#[derive(Clone)]
pub struct OutputStream {
    name: String,
    producer: Arc<dyn EntityProducer>,
}

impl OutputStream {
    pub fn new(name: impl Into<String>, producer: Arc<dyn EntityProducer>) -> Self {
        Self {
            name: name.into(),
            producer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lazy entity sequence; may be called any number of times.
    pub fn entities(&self) -> AdapterResult<Entities> {
        self.producer.produce()
    }

    /// Collect every entity of the stream.
    pub fn list(&self) -> AdapterResult<Vec<Entity>> {
        Ok(self.entities()?.collect())
    }
}

impl fmt::Debug for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputStream").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::normalize;
    use crate::source::CellValue;

    fn staff() -> NormalizedDataset {
        let dataset = TabularDataset::new(["Name", "RowId", "Email Address"])
            .with_row([CellValue::from("Ann"), CellValue::Int(10), CellValue::from("ann@x.org")])
            .unwrap()
            .with_row([CellValue::from("Bob"), CellValue::Int(11), CellValue::Null])
            .unwrap();
        let schema = normalize(&dataset, "RowId", "").unwrap();
        NormalizedDataset::new(dataset, schema, "Staff").unwrap()
    }

    struct Fixed(Arc<NormalizedDataset>);

    impl EntityProducer for Fixed {
        fn produce(&self) -> AdapterResult<Entities> {
            Ok(Entities::new(self.0.clone()))
        }
    }

    #[test]
    fn entity_maps_row_in_sanitized_order() {
        let e = staff().entity(0).unwrap();
        assert_eq!(e.id, 10);
        assert_eq!(e.content_type, "Staff");
        assert_eq!(e.title_field, "Name");
        assert_eq!(e.title, CellValue::from("Ann"));

        let names: Vec<&str> = e.attribute_names().collect();
        assert_eq!(names, vec!["Name", "EmailAddress"]);
        assert_eq!(e.get("EmailAddress"), Some(&CellValue::from("ann@x.org")));
        assert_eq!(e.get("RowId"), None);
    }

    #[test]
    fn entity_out_of_range_is_none() {
        assert!(staff().entity(2).is_none());
    }

    #[test]
    fn entities_iterate_lazily_and_report_size() {
        let mut it = Entities::new(Arc::new(staff()));
        assert_eq!(it.len(), 2);
        assert_eq!(it.next().map(|e| e.id), Some(10));
        assert_eq!(it.len(), 1);
        assert_eq!(it.next().map(|e| e.id), Some(11));
        assert!(it.next().is_none());
    }

    #[test]
    fn bad_identifier_fails_before_any_entity() {
        let dataset = TabularDataset::new(["RowId", "Name"])
            .with_row([CellValue::Int(1), CellValue::from("Ann")])
            .unwrap()
            .with_row([CellValue::from("x"), CellValue::from("Bob")])
            .unwrap();
        let schema = normalize(&dataset, "RowId", "").unwrap();

        let err = NormalizedDataset::new(dataset, schema, "Staff").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidIdentifierValue { row: 1, .. }));
    }

    // === Scenario: stream is restartable ===
    #[test]
    fn stream_can_be_read_repeatedly() {
        let stream = OutputStream::new(DEFAULT_STREAM, Arc::new(Fixed(Arc::new(staff()))));
        assert_eq!(stream.name(), "Default");

        let first = stream.list().unwrap();
        let second = stream.list().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }
}
