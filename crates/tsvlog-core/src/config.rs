//! Configuration types for tsvlog.
//!
//! [`Config::load`] layers `~/.config/tsvlog/config.toml` (when present) and
//! `TSVLOG_*` environment variables over the hardcoded defaults.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[parser]
separator         = "\t"
skip_blank_lines  = false
strip_decorations = false

[normalizer]
timestamp_formats = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d",
]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

/// `[parser]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Splits a line into tokens. Must not be empty.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Whitespace-only lines produce no record (off: they reach the
    /// normalizer with an empty `time` and fail the load).
    #[serde(default = "default_skip_blank_lines")]
    pub skip_blank_lines: bool,
    /// Strip `[..]` around time and host and a trailing `:` after level.
    #[serde(default)]
    pub strip_decorations: bool,
}

fn default_separator() -> String { "\t".to_string() }
fn default_skip_blank_lines() -> bool { false }

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            skip_blank_lines: default_skip_blank_lines(),
            strip_decorations: false,
        }
    }
}

/// `[normalizer]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizerConfig {
    /// `chrono` formats tried in order after RFC 3339. Each is tried as a
    /// date-time first, then as a bare date.
    #[serde(default = "default_timestamp_formats")]
    pub timestamp_formats: Vec<String>,
}

fn default_timestamp_formats() -> Vec<String> {
    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S%.f",
        "%Y-%m-%d",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            timestamp_formats: default_timestamp_formats(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/tsvlog/config.toml` if it exists, then apply
    /// `TSVLOG_<SECTION>__<KEY>` environment overrides. Never writes.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix("TSVLOG")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Layer an explicit config file (which must exist) over the defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("tsvlog")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
