//! Stats exporter invoked by the host bundler after assets are emitted.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::ExporterOptions;
use crate::manifest::build_manifest;
use crate::report::CompilationReport;

/// Hook invoked by a host bundler once all assets for a build are final.
pub trait AfterEmit {
  /// Consume the compilation report for a finished build.
  ///
  /// `context_dir` is the base directory module names are made relative to.
  fn after_emit(&self, report: &CompilationReport, context_dir: &Path) -> Result<()>;
}

/// Writes a derived JSON manifest for each finished build.
///
/// Holds only the resolved output path; every [`Self::on_build_complete`]
/// call is an independent transform with no carried-over state.
#[derive(Debug, Clone)]
pub struct StatsExporter {
  stats_file: PathBuf,
}

impl StatsExporter {
  /// Configure an exporter, resolving the stats file against the current
  /// working directory.
  pub fn configure(options: &ExporterOptions) -> Result<Self> {
    let working_dir = env::current_dir().context("failed to determine working directory")?;
    Ok(Self::with_working_dir(options, &working_dir))
  }

  /// Configure an exporter resolving relative paths against an explicit
  /// working directory.
  pub fn with_working_dir(options: &ExporterOptions, working_dir: &Path) -> Self {
    Self {
      stats_file: options.resolve_stats_file(working_dir),
    }
  }

  /// Absolute path the manifest is written to.
  pub fn stats_file(&self) -> &Path {
    &self.stats_file
  }

  /// Transform the report into a manifest and persist it.
  ///
  /// The manifest is built entirely in memory before the single file write;
  /// any previous file content is fully replaced. Write failures surface the
  /// underlying I/O error and are not retried.
  pub fn on_build_complete(
    &self,
    report: &CompilationReport,
    context_dir: &Path,
  ) -> Result<()> {
    debug!(
      entrypoints = report.entrypoint_assets.len(),
      modules = report.modules.len(),
      "building stats manifest"
    );

    let manifest = build_manifest(report, context_dir);
    let json = serde_json::to_string_pretty(&manifest).context("failed to serialize manifest")?;
    fs::write(&self.stats_file, json).with_context(|| {
      format!("failed to write stats file {}", self.stats_file.display())
    })?;

    debug!(path = %self.stats_file.display(), "stats manifest written");
    Ok(())
  }
}

impl AfterEmit for StatsExporter {
  fn after_emit(&self, report: &CompilationReport, context_dir: &Path) -> Result<()> {
    self.on_build_complete(report, context_dir)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::report::{EntrypointAssets, ModuleRecord};
  use tempfile::tempdir;

  fn exporter_in(dir: &Path) -> StatsExporter {
    StatsExporter::with_working_dir(&ExporterOptions::default(), dir)
  }

  fn sample_report() -> CompilationReport {
    let mut report = CompilationReport {
      public_path: "/p/".into(),
      ..CompilationReport::default()
    };
    report
      .entrypoint_assets
      .insert("main".into(), EntrypointAssets::One("main.js".into()));
    report.modules = vec![ModuleRecord {
      name: "/ctx/src/cat.gif".into(),
      assets: vec!["h1.gif".into()],
    }];
    report
  }

  #[test]
  fn writes_two_space_indented_manifest() {
    let dir = tempdir().unwrap();
    let exporter = exporter_in(dir.path());

    exporter
      .on_build_complete(&sample_report(), Path::new("/ctx"))
      .unwrap();

    let written = fs::read_to_string(exporter.stats_file()).unwrap();
    let expected = concat!(
      "{\n",
      "  \"assets\": {\n",
      "    \"src/cat.gif\": \"/p/h1.gif\"\n",
      "  },\n",
      "  \"main_js\": [\n",
      "    \"/p/main.js\"\n",
      "  ],\n",
      "  \"main_js_import\": \"<script src=\\\"/p/main.js\\\"></script>\",\n",
      "  \"main_css\": [],\n",
      "  \"main_css_import\": \"\"\n",
      "}",
    );
    assert_eq!(written, expected);
  }

  #[test]
  fn identical_inputs_produce_byte_identical_output() {
    let dir = tempdir().unwrap();
    let exporter = exporter_in(dir.path());
    let report = sample_report();

    exporter.on_build_complete(&report, Path::new("/ctx")).unwrap();
    let first = fs::read(exporter.stats_file()).unwrap();
    exporter.on_build_complete(&report, Path::new("/ctx")).unwrap();
    let second = fs::read(exporter.stats_file()).unwrap();

    assert_eq!(first, second);
  }

  #[test]
  fn replaces_previous_file_content_entirely() {
    let dir = tempdir().unwrap();
    let exporter = exporter_in(dir.path());
    fs::write(exporter.stats_file(), "{\"stale\": true}").unwrap();

    exporter
      .on_build_complete(&CompilationReport::default(), Path::new("/ctx"))
      .unwrap();

    let written = fs::read_to_string(exporter.stats_file()).unwrap();
    assert!(!written.contains("stale"));
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["assets"], serde_json::json!({}));
  }

  #[test]
  fn empty_report_writes_manifest_with_empty_assets() {
    let dir = tempdir().unwrap();
    let exporter = exporter_in(dir.path());

    exporter
      .on_build_complete(&CompilationReport::default(), Path::new("/ctx"))
      .unwrap();

    let written = fs::read_to_string(exporter.stats_file()).unwrap();
    assert_eq!(written, "{\n  \"assets\": {}\n}");
  }

  #[test]
  fn write_failure_surfaces_an_error() {
    let dir = tempdir().unwrap();
    let options = ExporterOptions {
      stats_file: Some("missing-dir/better-stats.json".into()),
    };
    let exporter = StatsExporter::with_working_dir(&options, dir.path());

    let result = exporter.on_build_complete(&CompilationReport::default(), Path::new("/ctx"));

    let err = result.unwrap_err();
    assert!(err.to_string().contains("failed to write stats file"));
  }

  #[test]
  fn runs_through_the_after_emit_hook() {
    let dir = tempdir().unwrap();
    let exporter = exporter_in(dir.path());
    let hook: &dyn AfterEmit = &exporter;

    hook.after_emit(&sample_report(), Path::new("/ctx")).unwrap();

    assert!(exporter.stats_file().exists());
  }
}
