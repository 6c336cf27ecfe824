//! Configuration tokens and their resolution
//!
//! Configuration is declared as config masks (`[Settings:ModuleId||0]`)
//! and resolved once against injected settings providers.

mod placeholder;
mod resolver;
mod settings;

pub use placeholder::{parse_mask, Placeholder, Segment};
pub use resolver::{
    ConfigurationError, ConfigurationResolver, ResolvedConfig, TokenDefinitions, PRIMARY_SOURCE,
};
pub use settings::{SettingsError, SettingsProvider, StaticSettings};
