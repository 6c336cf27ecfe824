//! Entity — the content-typed record handed to the templating pipeline

use crate::source::CellValue;
use indexmap::IndexMap;
use serde::Serialize;

/// A normalized row tagged with a content type.
///
/// Attributes hold every column except the identifier, in sanitized column
/// order; the title column appears both as `title` and among the attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// Row identifier from the identifier column
    pub id: i64,
    /// Content-type tag shared by every entity of one adapter
    pub content_type: String,
    /// Name of the attribute used as title
    pub title_field: String,
    /// Value of the title attribute
    pub title: CellValue,
    /// Attribute name → value
    pub attributes: IndexMap<String, CellValue>,
}

impl Entity {
    /// Value of a named attribute.
    pub fn get(&self, attribute: &str) -> Option<&CellValue> {
        self.attributes.get(attribute)
    }

    /// Title rendered as plain text; empty when the title cell is null.
    pub fn title_text(&self) -> String {
        self.title.to_string()
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}
