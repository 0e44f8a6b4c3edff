//! Error kinds surfaced by the cleaning pipeline.
//!
//! Library operations return [`Result`]; the command-line driver layers
//! `anyhow` context on top and maps every kind to a non-zero exit code.

use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = DemographicsError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DemographicsError {
    /// Wrong number of command-line arguments.
    #[error("{0}")]
    Usage(String),
    #[error("Cannot access {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed delimited content in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("{0}")]
    Validation(String),
    #[error("Serializing report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DemographicsError {
    pub fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DemographicsError::File {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DemographicsError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn missing_column(name: &str) -> Self {
        DemographicsError::Validation(format!("Required column '{name}' not found in dataset"))
    }

    /// Converts a csv-crate failure, keeping I/O problems distinct from
    /// malformed content.
    pub fn from_csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        let path = path.into();
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(source) => DemographicsError::File { path, source },
                other => DemographicsError::Parse {
                    path,
                    message: format!("{other:?}"),
                },
            }
        } else {
            DemographicsError::Parse {
                message: err.to_string(),
                path,
            }
        }
    }
}
