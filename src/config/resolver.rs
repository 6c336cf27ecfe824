//! ConfigurationResolver — turns config masks into concrete values

use super::placeholder::{parse_mask, Placeholder, Segment};
use super::settings::{SettingsError, SettingsProvider};
use indexmap::IndexMap;
use std::sync::Arc;
use thiserror::Error;

/// Name under which the primary settings provider is registered.
pub const PRIMARY_SOURCE: &str = "Settings";

/// Config masks keyed by configuration name, in registration order.
pub type TokenDefinitions = IndexMap<String, String>;

/// Errors from resolving or interpreting configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigurationError {
    #[error("source identifier '{value}' is not an integer")]
    InvalidIdentifier { value: String },

    #[error("content type resolved to an empty value")]
    MissingContentType,

    #[error("settings source '{source_name}' unreachable while resolving '{token}': {source}")]
    Unreachable {
        token: String,
        source_name: String,
        #[source]
        source: SettingsError,
    },
}

/// Configuration values after every mask has been resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    values: IndexMap<String, String>,
}

impl ResolvedConfig {
    /// Resolved value for a configuration name; unknown names read as empty.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resolves config masks against one or more named settings providers.
///
/// `[Source:Key]` reads `Key` from the provider registered as `Source`
/// (case-insensitive). `[Key]` reads from the primary provider. Absent or
/// empty settings fall back to the token's default.
#[derive(Clone)]
pub struct ConfigurationResolver {
    sources: Vec<(String, Arc<dyn SettingsProvider>)>,
}

impl ConfigurationResolver {
    /// Create a resolver whose primary provider answers `[Settings:...]`.
    pub fn new(primary: Arc<dyn SettingsProvider>) -> Self {
        Self {
            sources: vec![(PRIMARY_SOURCE.to_string(), primary)],
        }
    }

    /// Register an additional named source. Re-registering a name replaces it.
    pub fn with_source(mut self, name: impl Into<String>, provider: Arc<dyn SettingsProvider>) -> Self {
        let name = name.into();
        self.sources.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.sources.push((name, provider));
        self
    }

    fn provider_for(&self, source: Option<&str>) -> Option<&(String, Arc<dyn SettingsProvider>)> {
        match source {
            None => self.sources.first(),
            Some(name) => self.sources.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)),
        }
    }

    fn resolve_placeholder(&self, token: &str, placeholder: &Placeholder) -> Result<String, ConfigurationError> {
        let Some((source_name, provider)) = self.provider_for(placeholder.source.as_deref()) else {
            return Ok(placeholder.fallback().to_string());
        };

        let value = provider
            .resolve(&placeholder.key)
            .map_err(|source| ConfigurationError::Unreachable {
                token: token.to_string(),
                source_name: source_name.clone(),
                source,
            })?;

        Ok(match value {
            Some(v) if !v.is_empty() => v,
            _ => placeholder.fallback().to_string(),
        })
    }

    /// Resolve a single config mask.
    pub fn resolve_mask(&self, token: &str, mask: &str) -> Result<String, ConfigurationError> {
        let mut out = String::new();
        for segment in parse_mask(mask) {
            match segment {
                Segment::Literal(text) => out.push_str(&text),
                Segment::Token(placeholder) => {
                    out.push_str(&self.resolve_placeholder(token, &placeholder)?)
                }
            }
        }
        Ok(out)
    }

    /// Resolve every definition, preserving registration order.
    pub fn resolve(&self, definitions: &TokenDefinitions) -> Result<ResolvedConfig, ConfigurationError> {
        let mut values = IndexMap::with_capacity(definitions.len());
        for (name, mask) in definitions {
            values.insert(name.clone(), self.resolve_mask(name, mask)?);
        }
        Ok(ResolvedConfig { values })
    }
}

impl std::fmt::Debug for ConfigurationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("ConfigurationResolver")
            .field("sources", &names)
            .finish()
    }
}
