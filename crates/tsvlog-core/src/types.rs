//! Core types for tsvlog-core.
//!
//! This module defines the data structures shared by the parser and the
//! normalizer: the per-line [`Record`], and the normalized [`Table`] made of
//! [`Row`]s whose values are read back as [`Cell`]s.

use chrono::NaiveDateTime;
use std::fmt;

/// Keys assigned positionally to the first four tokens of a line.
pub const PREFIX_KEYS: [&str; 4] = ["time", "host", "level", "subject"];

/// Leading columns of every [`Table`], in order.
pub const PREFIX_COLUMNS: [&str; 5] = ["time", "dt", "host", "level", "subject"];

/// Key given to a trailing token that has no `=`.
pub const BARE_KEY: &str = "_";

/// Format used when a [`Cell::Time`] is displayed.
pub const TIME_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One tokenized log line: field names mapped to raw string values, in the
/// order the tokens appeared.
///
/// Keys are unique. [`Record::insert`] never overwrites; a colliding key is
/// renamed by prefixing underscores until it is free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Add a field, renaming `key` if it is already taken. Returns the key
    /// the value was stored under.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &str {
        let key = available_key(self, key.into());
        self.fields.push((key, value.into()));
        // Just pushed, so the last slot is populated.
        self.fields.last().map(|(k, _)| k.as_str()).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// First of `key`, `_key`, `__key`, ... that is not already in `record`.
pub fn available_key(record: &Record, key: String) -> String {
    if !record.contains_key(&key) {
        return key;
    }
    let mut candidate = format!("_{key}");
    while record.contains_key(&candidate) {
        candidate.insert(0, '_');
    }
    tracing::debug!(%key, renamed = %candidate, "field name already taken");
    candidate
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// A single value read out of a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// The parsed `time` column.
    Time(NaiveDateTime),
    /// The derived `dt` column, in seconds.
    Seconds(f64),
    /// Any other column, verbatim from the log line.
    Text(&'a str),
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Time(t) => write!(f, "{}", t.format(TIME_DISPLAY_FORMAT)),
            Cell::Seconds(s) => write!(f, "{s}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// One row of a normalized [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Dense 0-based position of the row after sorting.
    pub index: usize,
    pub time: NaiveDateTime,
    /// Seconds elapsed since the earliest `time` in the table.
    pub dt: f64,
    /// The record this row was built from. Only a `dt` key is ever renamed.
    pub record: Record,
}

impl Row {
    /// Value of `column` in this row, or `None` for a null cell.
    pub fn get(&self, column: &str) -> Option<Cell<'_>> {
        match column {
            "time" => Some(Cell::Time(self.time)),
            "dt" => Some(Cell::Seconds(self.dt)),
            _ => self.record.get(column).map(Cell::Text),
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.record.get("host")
    }
}

/// Every record of a log file as one time-sorted table.
///
/// Columns are `time, dt, host, level, subject` followed by every other key
/// seen in any record, sorted. Built once by
/// [`Normalizer`](crate::normalizer::Normalizer) and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Every cell of `name`, top to bottom. `None` if the table has no such
    /// column.
    pub fn column<'a>(
        &'a self,
        name: &'a str,
    ) -> Option<impl Iterator<Item = Option<Cell<'a>>> + 'a> {
        if !self.has_column(name) {
            return None;
        }
        Some(self.rows.iter().map(move |row| row.get(name)))
    }

    /// Largest `dt` in the table, i.e. the time covered by the log.
    pub fn span(&self) -> Option<f64> {
        self.rows.iter().map(|row| row.dt).reduce(f64::max)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
