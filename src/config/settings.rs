//! Settings providers — the external values config masks resolve against

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a settings backend.
///
/// A missing setting is not an error; providers return `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum SettingsError {
    #[error("settings backend unreachable: {0}")]
    Unreachable(String),

    #[error("settings document invalid: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[source] Arc<std::io::Error>),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(Arc::new(e))
    }
}

/// A scalar entry of a settings document; nested values fail to parse.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SettingValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SettingValue {
    fn into_text(self) -> Option<String> {
        match self {
            SettingValue::Null => None,
            SettingValue::Bool(b) => Some(b.to_string()),
            SettingValue::Int(i) => Some(i.to_string()),
            SettingValue::Float(x) => Some(x.to_string()),
            SettingValue::Text(s) => Some(s),
        }
    }
}

/// A source of named setting values.
pub trait SettingsProvider: Send + Sync {
    /// Look up a setting by name.
    ///
    /// `Ok(None)` means the setting is absent. `Err` is reserved for a
    /// backend that cannot answer at all.
    fn resolve(&self, name: &str) -> Result<Option<String>, SettingsError>;
}

/// In-memory settings with case-insensitive names.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    values: HashMap<String, String>,
}

impl StaticSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a setting.
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.values.insert(name.as_ref().to_lowercase(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Load a flat YAML mapping of setting names to scalar values.
    ///
    /// Numbers and booleans are stringified; `null` entries are skipped.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SettingsError> {
        let doc: HashMap<String, SettingValue> =
            serde_yaml::from_str(yaml).map_err(|e| SettingsError::Parse(e.to_string()))?;
        Ok(Self::from_document(doc))
    }

    /// Load a flat JSON object of setting names to scalar values.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let doc: HashMap<String, SettingValue> =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: HashMap<String, SettingValue>) -> Self {
        doc.into_iter()
            .filter_map(|(name, value)| value.into_text().map(|text| (name, text)))
            .collect()
    }

    /// Load settings from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

impl SettingsProvider for StaticSettings {
    fn resolve(&self, name: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.values.get(&name.to_lowercase()).cloned())
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for StaticSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut settings = Self::new();
        for (name, value) in iter {
            settings.insert(name, value);
        }
        settings
    }
}
