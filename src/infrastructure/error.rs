// Errors raised while producing metric readings
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A reading the core must never see, e.g. a NaN value.
    #[error("Invalid reading #{index} ({name:?}): {reason}")]
    InvalidReading {
        index: usize,
        name: String,
        reason: &'static str,
    },
}
