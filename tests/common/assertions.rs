//! Domain-specific assertions for tsvlog harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* table invariant was violated and on which row.

use tsvlog_core::{Cell, Table};

// ---------------------------------------------------------------------------
// Cell assertions
// ---------------------------------------------------------------------------

/// Assert that a table cell holds the expected text.
///
/// ```rust
/// assert_text!(table, 0, "host", "node-a");
/// ```
#[macro_export]
macro_rules! assert_text {
    ($table:expr, $row:expr, $column:expr, $value:expr) => {{
        let table: &tsvlog_core::Table = &$table;
        let row: usize = $row;
        let column: &str = $column;
        let expected: &str = $value;
        match table.row(row).and_then(|r| r.get(column)) {
            Some(tsvlog_core::Cell::Text(actual)) if actual == expected => {}
            other => panic!(
                "assert_text! failed:\n  table[{}][{:?}]\n  expected: {:?}\n  actual:   {:?}",
                row, column, expected, other
            ),
        }
    }};
}

/// Assert that a table cell is null.
#[macro_export]
macro_rules! assert_null {
    ($table:expr, $row:expr, $column:expr) => {{
        let table: &tsvlog_core::Table = &$table;
        let row: usize = $row;
        let column: &str = $column;
        if let Some(cell) = table.row(row).and_then(|r| r.get(column)) {
            panic!(
                "assert_null! failed: table[{}][{:?}] = {:?}",
                row, column, cell
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Table invariants
// ---------------------------------------------------------------------------

/// Columns start with `time, dt, host, level, subject`; the rest are sorted
/// and unique.
pub fn assert_column_order(table: &Table) {
    let columns = table.columns();
    pretty_assertions::assert_eq!(
        &columns[..5],
        ["time", "dt", "host", "level", "subject"],
        "prefix columns out of order"
    );
    let rest = &columns[5..];
    assert!(
        rest.windows(2).all(|w| w[0] < w[1]),
        "extra columns not strictly ascending: {rest:?}"
    );
}

/// Adjacent rows satisfy `(time, host)` ascending, hosts present before
/// hosts absent.
pub fn assert_sorted(table: &Table) {
    for pair in table.rows().windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let ordered = match a.time.cmp(&b.time) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => match (a.host(), b.host()) {
                (Some(x), Some(y)) => x <= y,
                (_, None) => true,
                (None, Some(_)) => false,
            },
        };
        assert!(
            ordered,
            "rows {} and {} out of order: ({}, {:?}) > ({}, {:?})",
            a.index,
            b.index,
            a.time,
            a.host(),
            b.time,
            b.host()
        );
    }
}

/// Row indices are exactly `0..n`.
pub fn assert_dense_indices(table: &Table) {
    let indices: Vec<usize> = table.rows().iter().map(|r| r.index).collect();
    let expected: Vec<usize> = (0..table.len()).collect();
    pretty_assertions::assert_eq!(indices, expected, "row indices are not dense");
}

/// `dt >= 0`, and exactly the earliest rows have `dt == 0`.
pub fn assert_dt_invariants(table: &Table) {
    let Some(earliest) = table.rows().iter().map(|r| r.time).min() else {
        return;
    };
    for row in table.rows() {
        assert!(row.dt >= 0.0, "row {} has negative dt {}", row.index, row.dt);
        assert_eq!(
            row.dt == 0.0,
            row.time == earliest,
            "row {}: dt {} does not match time {} (earliest {})",
            row.index,
            row.dt,
            row.time,
            earliest
        );
        assert_eq!(row.get("dt"), Some(Cell::Seconds(row.dt)));
    }
}

/// Every structural invariant of a normalized table.
pub fn assert_table_invariants(table: &Table) {
    assert_column_order(table);
    assert_sorted(table);
    assert_dense_indices(table);
    assert_dt_invariants(table);
}
