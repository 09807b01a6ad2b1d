//! Canonicalization of catalog metadata.
//!
//! - [`datetime`]: date values to storage, index, and display forms.
//! - [`localize`]: multilingual values to a single language.
//! - [`format`]: resource format and media type classification.
//! - [`terms`]: terms-of-use aggregation over a dataset's resources.
//! - [`index`]: the resource-derived fields of an index document.
//!
//! All functions are pure and safe to call concurrently; the only state is
//! the immutable [`Canonicalizer`] context.

pub mod canon;
pub mod codec;
pub mod datetime;
pub mod error;
pub mod format;
pub mod index;
pub mod localize;
pub mod terms;

pub use canon::Canonicalizer;
pub use codec::{decode_json, decode_or_keep, encode_multilingual};
pub use datetime::{DateNormalizer, DateRule, IndexDate, StorageDate};
pub use error::{DateParseError, DecodeError};
pub use format::{FormatRule, LINKED_DATA_FORMATS, ResourceFormatClassifier};
pub use index::{IndexProjector, ResourceIndexFields};
pub use localize::{
    INDEX_LANGUAGES, flatten_fluent_fields, lang_to_string, localize_record, resolve,
    resolve_from_encoded, resolve_text, strip_accents,
};
pub use terms::{dataset_rights, dataset_term, resource_term, simplify_term};
