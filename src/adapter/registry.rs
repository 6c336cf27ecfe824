//! Static registration table for data sources
//!
//! Hosts find data sources by name here instead of scanning assemblies.
//! A descriptor carries the metadata a pipeline editor shows plus the
//! function that builds the source.

use super::error::{AdapterError, AdapterResult};
use super::form_and_list;
use super::traits::{AdapterServices, DataSource};
use uuid::Uuid;

/// Role of a data source within a pipeline.
///
/// Only sources that bring data in from outside are registered today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    Source,
}

/// Declared identity and capabilities of a data source.
#[derive(Debug)]
pub struct DataSourceDescriptor {
    /// Stable type name
    pub type_name: &'static str,
    /// Globally unique name, stored in saved pipelines
    pub global_name: Uuid,
    /// Label for pipeline editors
    pub nice_name: &'static str,
    /// Names this source was registered under before, still accepted
    pub previous_names: &'static [&'static str],
    pub kind: DataSourceKind,
    /// Content type describing the configuration this source expects
    pub expects_data_of_type: Option<Uuid>,
    pub help_link: Option<&'static str>,
    /// Out-streams the source provides
    pub out_streams: &'static [&'static str],
    /// Configuration names and their default config masks
    pub config_masks: &'static [(&'static str, &'static str)],
    /// Build an instance
    pub construct: fn(AdapterServices) -> Box<dyn DataSource>,
}

impl DataSourceDescriptor {
    /// True if `name` is any of the names this descriptor answers to.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        if let Ok(guid) = Uuid::parse_str(name) {
            return guid == self.global_name;
        }
        self.type_name.eq_ignore_ascii_case(name)
            || self.nice_name.eq_ignore_ascii_case(name)
            || self
                .previous_names
                .iter()
                .any(|p| p.eq_ignore_ascii_case(name))
    }
}

static DATA_SOURCES: &[&DataSourceDescriptor] = &[&form_and_list::DESCRIPTOR];

/// Every registered data source.
pub fn all() -> &'static [&'static DataSourceDescriptor] {
    DATA_SOURCES
}

/// Find a data source by type name, nice name, global name or previous name.
pub fn lookup(name: &str) -> Option<&'static DataSourceDescriptor> {
    DATA_SOURCES.iter().copied().find(|d| d.matches(name))
}

/// Build the data source registered under `name`.
pub fn construct(name: &str, services: AdapterServices) -> AdapterResult<Box<dyn DataSource>> {
    let descriptor = lookup(name).ok_or_else(|| AdapterError::UnknownDataSource(name.to_string()))?;
    Ok((descriptor.construct)(services))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticSettings;
    use crate::source::InMemorySource;
    use std::sync::Arc;

    fn services() -> AdapterServices {
        AdapterServices::new(Arc::new(StaticSettings::new()), Arc::new(InMemorySource::new()))
    }

    #[test]
    fn form_and_list_is_registered() {
        assert_eq!(all().len(), 1);
        let d = lookup("DnnFormAndList").unwrap();
        assert_eq!(d.nice_name, "Dnn FormAndList");
        assert_eq!(d.kind, DataSourceKind::Source);
        assert_eq!(d.out_streams, ["Default"]);
    }

    #[test]
    fn lookup_by_global_name() {
        let d = lookup("0a0924a5-ca2f-4db5-8fc7-1a21fdbb2fbb").unwrap();
        assert_eq!(d.type_name, "DnnFormAndList");
        assert!(lookup("{0A0924A5-CA2F-4DB5-8FC7-1A21FDBB2FBB}").is_some());
        assert!(lookup("00000000-0000-0000-0000-000000000000").is_none());
    }

    #[test]
    fn lookup_by_previous_name() {
        assert!(lookup("ToSic.SexyContent.DataSources.DnnFormAndList, ToSic.SexyContent").is_some());
        assert!(lookup("Environment.Dnn7.DataSources.DnnFormAndList, ToSic.SexyContent").is_some());
    }

    #[test]
    fn lookup_by_nice_name_ignores_case() {
        assert!(lookup("dnn formandlist").is_some());
        assert!(lookup("Something Else").is_none());
    }

    #[test]
    fn construct_builds_source_with_default_stream() {
        let source = construct("DnnFormAndList", services()).unwrap();
        assert_eq!(source.descriptor().type_name, "DnnFormAndList");
        assert_eq!(source.stream_names(), vec!["Default"]);
        assert!(source.out("default").is_ok());
    }

    #[test]
    fn construct_unknown_name_fails() {
        let err = construct("NoSuchSource", services()).err().unwrap();
        assert!(matches!(err, AdapterError::UnknownDataSource(n) if n == "NoSuchSource"));
    }
}
