use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown language code: {0}")]
    UnknownLanguage(String),
    #[error("unknown terms of use identifier: {0}")]
    UnknownTerm(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
