//! Error types for normalization.

use thiserror::Error;

/// A date value that could not be brought into canonical form.
///
/// `Unparseable` is a per-record data-quality condition; callers log it and
/// move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("unparseable date value: {value:?}")]
    Unparseable { value: String },

    #[error("invalid date pattern: {pattern:?}")]
    InvalidPattern { pattern: String },
}

impl DateParseError {
    pub(crate) fn unparseable(value: &str) -> Self {
        Self::Unparseable {
            value: value.to_string(),
        }
    }
}

/// A stored value that is not a valid encoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
