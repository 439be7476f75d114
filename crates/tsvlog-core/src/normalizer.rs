//! Normalizer — assembles parsed [`Record`]s into a sorted [`Table`].
//!
//! Steps, in order:
//!
//! 1. collect every record and the union of their keys (a `dt` annotation is
//!    renamed so the derived column cannot hide it),
//! 2. parse each `time` value (the first failure aborts the whole batch),
//! 3. derive `dt`, the seconds since the earliest `time`,
//! 4. stable-sort rows by `(time, host)` and renumber them `0..n`,
//! 5. order columns as `time, dt, host, level, subject`, then the rest sorted.

use crate::config::NormalizerConfig;
use crate::error::{Error, Result};
use crate::types::{available_key, Record, Row, Table, PREFIX_COLUMNS};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Ordering;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Parse a `time` value. RFC 3339 is tried first (offsets are converted
    /// to UTC), then each configured format as a date-time and as a date.
    pub fn parse_time(&self, value: &str) -> Option<NaiveDateTime> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
            return Some(ts.naive_utc());
        }
        self.config.timestamp_formats.iter().find_map(|fmt| {
            NaiveDateTime::parse_from_str(value, fmt).ok().or_else(|| {
                NaiveDate::parse_from_str(value, fmt)
                    .ok()
                    .map(|d| d.and_time(NaiveTime::MIN))
            })
        })
    }

    /// Normalize a parser stream, failing on its first read error.
    pub fn normalize_results<I>(&self, records: I) -> Result<Table>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        let records = records.into_iter().collect::<Result<Vec<_>>>()?;
        self.normalize(records)
    }

    pub fn normalize<I>(&self, records: I) -> Result<Table>
    where
        I: IntoIterator<Item = Record>,
    {
        let records: Vec<Record> = records.into_iter().map(move_derived_keys).collect();

        let extra: BTreeSet<String> = records
            .iter()
            .flat_map(|record| record.keys())
            .filter(|key| !PREFIX_COLUMNS.iter().any(|c| c == key))
            .map(str::to_string)
            .collect();

        let times = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let line = i + 1;
                let raw = record.get("time").ok_or(Error::MissingTime { line })?;
                self.parse_time(raw).ok_or_else(|| Error::Timestamp {
                    line,
                    value: raw.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let origin = times.iter().min().copied();
        let mut rows: Vec<Row> = records
            .into_iter()
            .zip(times)
            .map(|(record, time)| Row {
                index: 0,
                time,
                dt: origin.map(|o| seconds_between(o, time)).unwrap_or_default(),
                record,
            })
            .collect();

        // Must stay stable: rows sharing (time, host) keep log order.
        rows.sort_by(|a, b| {
            a.time
                .cmp(&b.time)
                .then_with(|| compare_hosts(a.host(), b.host()))
        });
        for (index, row) in rows.iter_mut().enumerate() {
            row.index = index;
        }

        let columns: Vec<String> = PREFIX_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(extra)
            .collect();

        tracing::debug!(rows = rows.len(), columns = columns.len(), "table normalized");
        Ok(Table::new(columns, rows))
    }
}

/// A `dt` annotation would be hidden by the derived column, so it is stored
/// under the next free `_dt` name instead.
fn move_derived_keys(record: Record) -> Record {
    if !record.contains_key("dt") {
        return record;
    }
    let renamed = available_key(&record, "dt".to_string());
    record
        .iter()
        .map(|(k, v)| if k == "dt" { (renamed.as_str(), v) } else { (k, v) })
        .collect()
}

fn seconds_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start)
        .to_std()
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

/// Rows without a host sort after rows with one.
fn compare_hosts(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
