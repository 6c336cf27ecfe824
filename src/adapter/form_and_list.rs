//! FormAndListSource — delivers Form-and-List table rows as entities
//!
//! Configuration is resolved, the table fetched and the schema normalized
//! once per instance, on first read. Every later read maps the cached
//! rows again without touching the source.

use super::error::{AdapterError, AdapterResult};
use super::registry::{DataSourceDescriptor, DataSourceKind};
use super::stream::{Entities, EntityProducer, NormalizedDataset, OutputStream, DEFAULT_STREAM};
use super::traits::{AdapterServices, DataSource};
use crate::config::{
    ConfigurationError, ConfigurationResolver, ResolvedConfig, SettingsProvider, TokenDefinitions,
};
use crate::entity::Entity;
use crate::schema::normalize;
use crate::source::TabularSourceProvider;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Log target for this data source.
pub const LOG_ID: &str = "Dnn.Ds-FnL";

/// Configuration name of the Form-and-List module id.
pub const MODULE_ID_KEY: &str = "ModuleId";
/// Configuration name of the title column.
pub const TITLE_FIELD_KEY: &str = "TitleField";
/// Configuration name of the content-type tag.
pub const CONTENT_TYPE_KEY: &str = "ContentType";

const CONFIG_MASKS: &[(&str, &str)] = &[
    (MODULE_ID_KEY, "[Settings:ModuleId||0]"),
    (TITLE_FIELD_KEY, "[Settings:TitleFieldName]"),
    (CONTENT_TYPE_KEY, "[Settings:ContentTypeName||FnL]"),
];

pub static DESCRIPTOR: DataSourceDescriptor = DataSourceDescriptor {
    type_name: "DnnFormAndList",
    global_name: Uuid::from_u128(0x0a0924a5_ca2f_4db5_8fc7_1a21fdbb2fbb),
    nice_name: "Dnn FormAndList",
    previous_names: &[
        "Environment.Dnn7.DataSources.DnnFormAndList, ToSic.SexyContent",
        "ToSic.SexyContent.DataSources.DnnFormAndList, ToSic.SexyContent",
    ],
    kind: DataSourceKind::Source,
    expects_data_of_type: Some(Uuid::from_u128(0xd98db323_7c33_4f2a_b173_ef91c0875124)),
    help_link: Some("https://github.com/2sic/dnn-datasource-form-and-list/wiki"),
    out_streams: &[DEFAULT_STREAM],
    config_masks: CONFIG_MASKS,
    construct,
};

fn construct(services: AdapterServices) -> Box<dyn DataSource> {
    Box::new(FormAndListSource::from_services(services))
}

/// Config masks plus the outcome of the first load, success or failure.
struct AdapterState {
    masks: TokenDefinitions,
    outcome: Option<AdapterResult<Arc<NormalizedDataset>>>,
}

struct Loader {
    resolver: ConfigurationResolver,
    source: Arc<dyn TabularSourceProvider>,
    state: Mutex<AdapterState>,
}

impl Loader {
    fn lock(&self) -> MutexGuard<'_, AdapterState> {
        // the outcome is written once, after the load returns, so a
        // poisoned guard still holds consistent state
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load on first call and replay that outcome on every later call.
    ///
    /// The lock is held for the whole load so concurrent first readers
    /// wait instead of fetching again. A failed load is replayed too: the
    /// settings and the source are consulted at most once per instance.
    fn ensure_loaded(&self) -> AdapterResult<Arc<NormalizedDataset>> {
        let mut state = self.lock();
        if let Some(outcome) = &state.outcome {
            return outcome.clone();
        }

        let outcome = self.load(&state.masks).map(Arc::new);
        if let Err(e) = &outcome {
            warn!(target: LOG_ID, error = %e, "form and list load failed");
        }
        state.outcome = Some(outcome.clone());
        outcome
    }

    fn load(&self, masks: &TokenDefinitions) -> AdapterResult<NormalizedDataset> {
        let config = self.resolver.resolve(masks)?;
        let module_id = module_id(&config)?;
        let title_field = config.get(TITLE_FIELD_KEY);
        let content_type = config.get(CONTENT_TYPE_KEY).trim();
        if content_type.is_empty() {
            return Err(ConfigurationError::MissingContentType.into());
        }
        debug!(
            target: LOG_ID,
            module_id,
            title_field,
            content_type,
            "configuration resolved"
        );

        let dataset = self
            .source
            .fetch(module_id)
            .map_err(|source| AdapterError::SourceUnavailable { id: module_id, source })?;

        let schema = normalize(&dataset, self.source.identifier_column(), title_field)?;
        let data = NormalizedDataset::new(dataset, schema, content_type)?;

        info!(
            target: LOG_ID,
            module_id,
            rows = data.len(),
            columns = data.schema().columns().len(),
            title_column = data.schema().title_column(),
            "form and list data loaded"
        );
        Ok(data)
    }
}

impl EntityProducer for Loader {
    fn produce(&self) -> AdapterResult<Entities> {
        Ok(Entities::new(self.ensure_loaded()?))
    }
}

fn module_id(config: &ResolvedConfig) -> Result<i32, ConfigurationError> {
    let raw = config.get(MODULE_ID_KEY);
    raw.trim()
        .parse()
        .map_err(|_| ConfigurationError::InvalidIdentifier {
            value: raw.to_string(),
        })
}

/// Data source reading a Form-and-List module's table.
///
/// Configuration (see [`DESCRIPTOR`]):
/// - `ModuleId` — `[Settings:ModuleId||0]`, the table to fetch
/// - `TitleField` — `[Settings:TitleFieldName]`, optional title column
/// - `ContentType` — `[Settings:ContentTypeName||FnL]`, entity type tag
pub struct FormAndListSource {
    loader: Arc<Loader>,
    out: IndexMap<String, OutputStream>,
}

impl FormAndListSource {
    pub fn new(settings: Arc<dyn SettingsProvider>, source: Arc<dyn TabularSourceProvider>) -> Self {
        let masks = CONFIG_MASKS
            .iter()
            .map(|(name, mask)| (name.to_string(), mask.to_string()))
            .collect();

        let loader = Arc::new(Loader {
            resolver: ConfigurationResolver::new(settings),
            source,
            state: Mutex::new(AdapterState {
                masks,
                outcome: None,
            }),
        });

        let mut out = IndexMap::new();
        out.insert(
            DEFAULT_STREAM.to_string(),
            OutputStream::new(DEFAULT_STREAM, loader.clone()),
        );

        Self { loader, out }
    }

    pub fn from_services(services: AdapterServices) -> Self {
        Self::new(services.settings, services.source)
    }

    /// Replace (or add) the config mask for a configuration name.
    ///
    /// Takes effect only if no load has been attempted yet.
    pub fn with_config_mask(self, name: impl Into<String>, mask: impl Into<String>) -> Self {
        {
            let mut state = self.loader.lock();
            if state.outcome.is_none() {
                state.masks.insert(name.into(), mask.into());
            }
        }
        self
    }

    /// Current config masks, in registration order.
    pub fn config_masks(&self) -> TokenDefinitions {
        self.loader.lock().masks.clone()
    }

    /// Resolve, fetch and normalize if that has not been attempted yet.
    pub fn ensure_loaded(&self) -> AdapterResult<Arc<NormalizedDataset>> {
        self.loader.ensure_loaded()
    }

    /// True once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        matches!(self.loader.lock().outcome, Some(Ok(_)))
    }

    /// The `Default` out-stream.
    pub fn default_stream(&self) -> &OutputStream {
        &self.out[DEFAULT_STREAM]
    }

    /// Lazy entity sequence of the `Default` stream.
    pub fn produce(&self) -> AdapterResult<Entities> {
        self.loader.produce()
    }

    /// All entities of the `Default` stream.
    pub fn list(&self) -> AdapterResult<Vec<Entity>> {
        self.default_stream().list()
    }
}

impl DataSource for FormAndListSource {
    fn descriptor(&self) -> &'static DataSourceDescriptor {
        &DESCRIPTOR
    }

    fn log_id(&self) -> &str {
        LOG_ID
    }

    fn out(&self, name: &str) -> AdapterResult<&OutputStream> {
        self.out
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, stream)| stream)
            .ok_or_else(|| AdapterError::UnknownStream(name.to_string()))
    }

    fn stream_names(&self) -> Vec<&str> {
        self.out.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for FormAndListSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormAndListSource")
            .field("streams", &self.stream_names())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
