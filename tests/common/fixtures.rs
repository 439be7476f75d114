//! Static log corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of tab-delimited lines without
//! trailing newlines. Lines are deliberately out of time order.

/// Well-formed lines: four prefix tokens plus `key=value` annotations.
pub const CORPUS_BASIC: &[&str] = &[
    "2024-01-15T10:00:02\tnode-b\tINFO\tMessage received\tfrom=10.0.0.1:54321\tloop=0",
    "2024-01-15T10:00:00\tnode-a\tINFO\tProgram started",
    "2024-01-15T10:00:01\tnode-b\tDEBUG\tsocket\tdomain=2\ttype=2\tprotocol=17",
    "2024-01-15T10:00:00\tnode-b\tINFO\tProgram started",
    "2024-01-15T10:00:05\tnode-a\tERROR\tsendto\terrno=111\tConnection refused",
];

/// Lines exercising key collisions and bare values.
pub const CORPUS_COLLISIONS: &[&str] = &[
    "2024-01-01T00:00:00\thostA\tINFO\tboot\tfoo=1\tfoo=2",
    "2024-01-01T00:00:01\thostA\tINFO\tnote\tfirst\tsecond",
    "2024-01-01T00:00:02\thostA\tINFO\tshadow\tlevel=custom\t_level=deeper",
];

/// Truncated lines: fewer than four prefix tokens.
pub const CORPUS_TRUNCATED: &[&str] = &[
    "2024-01-01T00:00:03",
    "2024-01-01T00:00:01\thostA",
    "2024-01-01T00:00:02\thostA\tWARN",
];

/// Lines shaped the way the peer-exchange test program writes them: bracketed
/// time and host, level with a trailing colon.
pub const CORPUS_DECORATED: &[&str] = &[
    "[2024-03-02T12:00:04]\t[peer-2]\tINFO:\tMessage received from 10.0.0.3:54321 during loop 0",
    "[2024-03-02T12:00:00]\t[peer-1]\tINFO:\tProgram started",
    "[2024-03-02T12:00:02]\t[peer-1]\tDEBUG:\tsocket: domain=2 type=2 protocol=17",
];

/// `count` records from `hosts` distinct hosts over a handful of distinct
/// timestamps, so many rows share `(time, host)`.
pub fn corpus_high_volume(count: usize, hosts: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "2024-01-15T10:00:{:02}\thost-{}\tINFO\tseq\tseq={}\tk{}=v",
                (count - i) % 7,
                i % hosts.max(1),
                i,
                i % 5,
            )
        })
        .collect()
}
