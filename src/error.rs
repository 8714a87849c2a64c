//! Error type shared by the dataset pipeline
//!
//! Tauri commands flatten these into `String` before they cross the IPC
//! boundary, everything below the command layer keeps the typed variants.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{0}")]
    Validation(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to serialize entry: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not decode {} as {encoding}", path.display())]
    Decode { path: PathBuf, encoding: &'static str },

    #[error("A dataset run is already in progress")]
    Busy,
}

impl DatasetError {
    /// Wrap an `io::Error` with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
