use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tsvlog_core::Config;

#[derive(Parser)]
#[command(name = "tsvlog", about = "Load a tab-delimited log as a time-sorted table")]
struct Cli {
    /// Log file to load.
    path: PathBuf,

    /// Config file layered over the built-in defaults (instead of
    /// ~/.config/tsvlog/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to stderr.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };

    tracing::debug!(path = %cli.path.display(), ?config, "loading log");

    let table = tsvlog_core::load_with(&cli.path, &config)
        .with_context(|| format!("loading {}", cli.path.display()))?;

    tracing::debug!(rows = table.len(), "log loaded");
    println!(
        "{}: {} rows, {} columns, {:.3}s span",
        cli.path.display(),
        table.len(),
        table.columns().len(),
        table.span().unwrap_or_default(),
    );
    Ok(())
}
