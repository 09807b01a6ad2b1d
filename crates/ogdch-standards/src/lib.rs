#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod paths;
pub mod synonyms;

pub use crate::error::StandardsError;
pub use crate::loader::{
    bundled_mappings, load_default_mappings, load_mappings_from_dir, load_synonym_table,
    parse_synonym_table,
};
pub use crate::synonyms::{FormatMappings, SynonymTable, TableKind};
