//! CLI wrapper around the stats exporter for reports saved as JSON files.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use better_stats::{CompilationReport, ExporterOptions, StatsExporter};

/// Convert a bundler compilation report into a better-stats manifest.
#[derive(Debug, Parser)]
#[command(name = "better-stats", version, about)]
struct Cli {
  /// Path to the compilation report JSON file.
  report: PathBuf,

  /// Base directory module names are made relative to.
  #[arg(long)]
  context: PathBuf,

  /// Where to write the manifest, relative paths resolved against the
  /// working directory. Defaults to ./better-stats.json, or the value in
  /// better-stats.config.json when present.
  #[arg(long)]
  stats_file: Option<String>,
}

/// Options for this run: an explicit `--stats-file` wins, otherwise any
/// config file discovered in the working directory.
fn resolve_options(stats_file: Option<String>, working_dir: &Path) -> ExporterOptions {
  match stats_file {
    Some(stats_file) => ExporterOptions {
      stats_file: Some(stats_file),
    },
    None => ExporterOptions::discover(working_dir),
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .init();

  let cli = Cli::parse();

  let content = fs::read_to_string(&cli.report)
    .with_context(|| format!("failed to read report {}", cli.report.display()))?;
  let report: CompilationReport = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse report {}", cli.report.display()))?;

  let working_dir = env::current_dir().context("failed to determine working directory")?;
  let options = resolve_options(cli.stats_file, &working_dir);
  let exporter = StatsExporter::with_working_dir(&options, &working_dir);
  exporter.on_build_complete(&report, &cli.context)?;

  info!(path = %exporter.stats_file().display(), "wrote stats manifest");
  Ok(())
}
