//! tsvlog-core — tab-delimited log records as a time-sorted table.
//!
//! This crate exposes the two pipeline stages as public modules, plus the
//! shared types and configuration.
//!
//! # Architecture
//!
//! ```text
//! file ──► LogRecordParser ──► Records ──► Normalizer ──► Table
//! ```
//!
//! Everything runs synchronously on the caller's thread. The file handle is
//! held by the [`parser::Records`] stream and released when it is dropped.

pub mod config;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod types;

use std::path::Path;

pub use config::Config;
pub use error::{Error, Result};
pub use normalizer::Normalizer;
pub use parser::LogRecordParser;
pub use types::{Cell, Record, Row, Table};

/// Parse and normalize the log at `path` with the default configuration.
pub fn load(path: impl AsRef<Path>) -> Result<Table> {
    load_with(path, &Config::defaults())
}

/// Parse and normalize the log at `path`.
pub fn load_with(path: impl AsRef<Path>, config: &Config) -> Result<Table> {
    let parser = LogRecordParser::new(config.parser.clone())?;
    let normalizer = Normalizer::new(config.normalizer.clone());
    normalizer.normalize_results(parser.parse_file(path)?)
}
