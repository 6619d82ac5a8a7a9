#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod exporter;
pub mod manifest;
pub mod report;

pub use config::{DEFAULT_STATS_FILE, ExporterOptions};
pub use exporter::{AfterEmit, StatsExporter};
pub use manifest::{ExportedManifest, ManifestValue, build_manifest};
pub use report::{CompilationReport, EntrypointAssets, ModuleRecord};
