//! Exporter configuration and stats-file path resolution.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Stats file written when no `stats_file` option is provided.
pub const DEFAULT_STATS_FILE: &str = "./better-stats.json";

/// Configuration file name searched for in the working directory.
const DEFAULT_CONFIG_FILE: &str = "better-stats.config.json";

/// Options accepted when configuring a [`crate::StatsExporter`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExporterOptions {
  /// Path the manifest is written to. Relative paths are resolved against
  /// the working directory at configuration time; absent or empty values
  /// fall back to [`DEFAULT_STATS_FILE`].
  pub stats_file: Option<String>,
}

impl ExporterOptions {
  /// Attempt to load options from the provided directory.
  ///
  /// When the configuration file does not exist or fails to parse we fall
  /// back to default values so callers can continue with sensible defaults.
  pub fn discover(working_dir: &Path) -> Self {
    let candidate = working_dir.join(DEFAULT_CONFIG_FILE);
    Self::from_path(&candidate).unwrap_or_default()
  }

  /// Read options from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
  }

  /// Resolve the configured stats file to an absolute path.
  ///
  /// An absolute `stats_file` is used unchanged; a relative one is joined
  /// onto `working_dir`.
  pub fn resolve_stats_file(&self, working_dir: &Path) -> PathBuf {
    let configured = match self.stats_file.as_deref() {
      Some(path) if !path.is_empty() => path,
      _ => DEFAULT_STATS_FILE,
    };
    let configured = Path::new(configured);
    if configured.is_absolute() {
      configured.to_path_buf()
    } else {
      working_dir.join(configured)
    }
  }
}
