pub mod error;
pub mod language;
pub mod options;
pub mod resource;
pub mod terms;

pub use error::{ModelError, Result};
pub use language::{Language, MultilingualText};
pub use options::{CanonOptions, DateOptions};
pub use resource::{Dataset, DatasetRights, Resource, ResourceFormat, Temporal};
pub use terms::TermOfUse;
