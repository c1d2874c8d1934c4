//! Font loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while acquiring a font
#[derive(Error, Debug)]
pub enum LoadError {
    /// A render or resolve was requested before any font source was set
    #[error("no font source configured")]
    InvalidSource,

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request for {url} failed: {reason}")]
    Http { url: String, reason: String },

    /// The file or asset exists but is not a usable font
    #[error("bad font resource {path}: {source}")]
    BadResource {
        path: PathBuf,
        #[source]
        source: fontbadge_text::TextError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("worker pool unavailable: {0}")]
    Runtime(String),

    /// Background work panicked before producing a result
    #[error("background work panicked: {0}")]
    WorkerPanicked(String),
}

pub type Result<T> = std::result::Result<T, LoadError>;
