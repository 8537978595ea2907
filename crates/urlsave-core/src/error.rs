//! Error type for the download pipeline.
//!
//! Every stage reports through `DownloadError` so callers can match on the
//! size and MIME sentinels without string inspection.

use std::io;
use std::path::PathBuf;

/// Error returned by a caller-supplied option mutator. Propagated unchanged.
pub type OptionError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// An option mutator rejected its input.
    #[error("invalid option: {0}")]
    InvalidOption(#[source] OptionError),

    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create file {}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Request could not be performed (DNS, connect, TLS, timeout, reset).
    #[error("GET request failed")]
    Transport(#[source] curl::Error),

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("max byte size exceeded (limit {limit} bytes)")]
    MaxSizeExceeded { limit: u64 },

    #[error("failed to read {} for MIME sniffing", path.display())]
    SniffRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("wrong mime type: expected {expected}, got {actual}")]
    WrongMimeType { expected: String, actual: String },

    #[error("wrong mime group: {actual} is not in [{}]", groups.join(", "))]
    WrongMimeGroup { groups: Vec<String>, actual: String },
}

impl DownloadError {
    /// True for rejections produced by the MIME validator (file was fetched fine).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DownloadError::WrongMimeType { .. } | DownloadError::WrongMimeGroup { .. }
        )
    }
}
