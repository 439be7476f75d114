//! Error type shared by the parser and the normalizer.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The log file could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a line failed part-way through the file (I/O or invalid UTF-8).
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    /// `line` is the 1-based position of the record in emission order.
    #[error("record {line}: invalid timestamp {value:?}")]
    Timestamp { line: usize, value: String },

    #[error("record {line}: no time field")]
    MissingTime { line: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}
