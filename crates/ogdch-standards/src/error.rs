#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML mapping {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing synonym table: {path}")]
    MissingTable { path: PathBuf },

    #[error("empty canonical code in {path}")]
    EmptyCanonical { path: PathBuf },

    #[error("synonym {synonym:?} in {path} maps to both {first:?} and {second:?}")]
    ConflictingSynonym {
        path: PathBuf,
        synonym: String,
        first: String,
        second: String,
    },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
