use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReqlogError {
    /// bad arguments, missing input files, unreadable config
    #[error("Configuration error: {0}")]
    Config(String),
    /// a log file could not be opened or read
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// a parsing worker died before returning its records
    #[error("Worker error: {0}")]
    Worker(String),
}

impl ReqlogError {
    /// process exit code for this failure class
    pub fn exit_code(&self) -> i32 {
        match self {
            ReqlogError::Config(_) => 2,
            ReqlogError::Io { .. } | ReqlogError::Worker(_) => 1,
        }
    }
}

/// result type alias for reqlog operations
pub type Result<T> = std::result::Result<T, ReqlogError>;
