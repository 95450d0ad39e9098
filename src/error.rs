use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop an extraction run.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Settings error: {0}")]
    Configuration(String),

    #[error("GeoJSON file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("File processor cannot be identified for '{0}'")]
    UnrecognizedCategory(String),

    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
