//! Fatal error type for the migration pipeline and the validator.
//!
//! Normalizers and builders never fail, and per-record validation findings are
//! reported as data. Only the cases below abort a run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    /// Reading or writing a file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serializing an output collection failed.
    #[error("Serialization error for '{file}': {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// The legacy input file could not be understood as a list of herb records.
    #[error("Invalid legacy input '{path}': {reason}")]
    InvalidInput { path: String, reason: String },

    /// Required output files are missing; validation cannot proceed.
    #[error("Missing required output files: {}", .0.join(", "))]
    MissingFiles(Vec<String>),

    /// An output file exists but is not the JSON shape the validator expects.
    #[error("Unreadable output file '{file}': {reason}")]
    UnreadableFile { file: String, reason: String },
}

impl MigrationError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        MigrationError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrationError>;
