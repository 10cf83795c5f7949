//! Error taxonomy
//!
//! Every error here is caught where it happens and turned into a status-line
//! message or an in-panel error render. Only `main` escalates, and only for
//! startup failures.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure to open or read the request file
#[derive(Debug, Error)]
pub enum FileError {
    #[error("open file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure of the file-change notification channel
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("watch error: {0}")]
    Notify(#[from] notify::Error),

    #[error("cannot watch {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot watch {}: no parent directory", .0.display())]
    NoParent(PathBuf),
}

/// Failure while executing one dispatch session
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("error creating request: {0}")]
    Build(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed read body: {0}")]
    Read(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl DispatchError {
    /// Classify a reqwest error raised while sending or reading
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            DispatchError::Timeout(timeout)
        } else if err.is_builder() {
            DispatchError::Build(err.to_string())
        } else if err.is_connect() {
            DispatchError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            DispatchError::Read(err.to_string())
        } else {
            DispatchError::Request(err.to_string())
        }
    }
}
