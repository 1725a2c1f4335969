//! Unified error model
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a run.
///
/// Rule violations and unmodeled cases are never errors; they are recorded
/// by the evaluators and accumulate into the run report.
#[derive(Error, Debug)]
pub enum RmrError {
    #[error("IO/{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON/{}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CONFIG/{0}")]
    Config(String),

    #[error("MODEL/{0}")]
    Model(String),
}

impl RmrError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, RmrError>;
