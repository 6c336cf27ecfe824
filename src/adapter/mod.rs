//! Data-source adapter layer
//!
//! Data sources turn external data into content-typed entities and expose
//! them on named out-streams. They are found through a static registry
//! and receive their collaborators through `AdapterServices`.

mod error;
pub mod form_and_list;
pub mod registry;
mod stream;
mod traits;

pub use error::{AdapterError, AdapterResult};
pub use form_and_list::FormAndListSource;
pub use registry::{DataSourceDescriptor, DataSourceKind};
pub use stream::{Entities, EntityProducer, NormalizedDataset, OutputStream, DEFAULT_STREAM};
pub use traits::{AdapterServices, DataSource};
