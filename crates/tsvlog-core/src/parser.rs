//! Parser — turns tab-delimited log lines into [`Record`]s.
//!
//! The first four tokens of a line are assigned positionally to `time`,
//! `host`, `level` and `subject`. Every later token is split on its first
//! `=` into a key and a value; a token without `=` is stored under `_`.
//! A key that is already present is prefixed with underscores until it is
//! free, so no token on a line is ever dropped or overwritten.
//!
//! Nothing is validated here. Unparseable timestamps travel through untouched
//! and are rejected by the [`Normalizer`](crate::normalizer::Normalizer).

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::types::{Record, BARE_KEY, PREFIX_KEYS};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

pub use crate::types::available_key;

/// Tokenizes log lines according to a [`ParserConfig`].
#[derive(Debug, Clone)]
pub struct LogRecordParser {
    config: ParserConfig,
}

impl Default for LogRecordParser {
    fn default() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }
}

impl LogRecordParser {
    pub fn new(config: ParserConfig) -> Result<Self> {
        if config.separator.is_empty() {
            return Err(Error::Config("parser.separator must not be empty".into()));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Tokenize a single line. Returns `None` only for a blank line when
    /// `skip_blank_lines` is set; otherwise a blank line is a record with an
    /// empty `time`.
    pub fn parse_line(&self, line: &str) -> Option<Record> {
        let line = line.trim();
        if line.is_empty() && self.config.skip_blank_lines {
            return None;
        }

        let mut tokens = line.split(self.config.separator.as_str());
        let mut record = Record::new();

        // `zip` polls the keys first, so the fifth token is left in `tokens`.
        for (key, token) in PREFIX_KEYS.iter().zip(tokens.by_ref()) {
            let token = if self.config.strip_decorations {
                undecorate(key, token)
            } else {
                token
            };
            record.insert(*key, token);
        }

        for token in tokens {
            match token.split_once('=') {
                Some((key, value)) => record.insert(key, value),
                None => record.insert(BARE_KEY, token),
            };
        }

        Some(record)
    }

    /// Open `path` read-only and return a lazy stream of its records. The
    /// file is closed when the stream is dropped.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Records<BufReader<File>>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened log file");
        Ok(self.parse_reader(BufReader::new(file)))
    }

    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Records<R> {
        Records {
            parser: self.clone(),
            lines: reader.lines(),
            failed: false,
        }
    }
}

/// Lazy stream of records, one per line of the underlying reader.
///
/// Yields `Err(Error::Read)` once if a line cannot be read, then stops.
pub struct Records<R> {
    parser: LogRecordParser,
    lines: Lines<R>,
    failed: bool,
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err.into()));
                }
            };
            if let Some(record) = self.parser.parse_line(&line) {
                return Some(Ok(record));
            }
        }
    }
}

/// Strip the `[time]\t[host]\tLEVEL:` wrapping some emitters put around the
/// prefix tokens.
fn undecorate<'a>(key: &str, token: &'a str) -> &'a str {
    match key {
        "time" | "host" => token
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .unwrap_or(token),
        "level" => token.strip_suffix(':').unwrap_or(token),
        _ => token,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
