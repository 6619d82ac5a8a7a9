//! Data contract for the compilation report handed over by the bundler.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Compilation report supplied by the host bundler once all assets for a
/// build have been emitted.
///
/// The report is ephemeral: a fresh one arrives per build and nothing is
/// carried over between invocations. Map and list ordering is meaningful and
/// preserved through deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilationReport {
  /// Emitted file names per entry-point name, in entry-point order.
  pub entrypoint_assets: IndexMap<String, EntrypointAssets>,
  /// Module records in processing order.
  pub modules: Vec<ModuleRecord>,
  /// URL prefix prepended to every emitted file name.
  pub public_path: String,
}

/// Emitted file names associated with an entry point.
///
/// Bundlers report a bare file name for single-file entry points and an
/// ordered list otherwise; both forms are accepted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EntrypointAssets {
  /// A single emitted file name.
  One(String),
  /// An ordered list of emitted file names.
  Many(Vec<String>),
}

impl EntrypointAssets {
  /// Normalized view of the emitted file names as an ordered slice.
  pub fn file_names(&self) -> &[String] {
    match self {
      Self::One(name) => std::slice::from_ref(name),
      Self::Many(names) => names,
    }
  }
}

impl Default for EntrypointAssets {
  fn default() -> Self {
    Self::Many(Vec::new())
  }
}

/// A processed module and the files it emitted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModuleRecord {
  /// Source path of the module, absolute or resolvable.
  pub name: String,
  /// File names emitted for this module, possibly empty.
  pub assets: Vec<String>,
}
