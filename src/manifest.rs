//! Pure transform from a compilation report to the exported manifest.

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::report::CompilationReport;

/// Manifest derived from a single compilation report.
///
/// Rebuilt from scratch every run; previous manifest content never influences
/// the result. Serializes as one flat JSON object: the `assets` map followed
/// by the four derived keys of each entry point, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportedManifest {
  /// Source-relative module path to emitted URL, for modules that emitted
  /// exactly one file.
  pub assets: IndexMap<String, String>,
  /// Per entry-point name `N`: `N_js`, `N_js_import`, `N_css` and
  /// `N_css_import`.
  #[serde(flatten)]
  pub entrypoints: IndexMap<String, ManifestValue>,
}

/// Value stored under a derived entry-point key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ManifestValue {
  /// Ordered emitted URLs (`N_js`, `N_css`).
  Urls(Vec<String>),
  /// Concatenated import snippets (`N_js_import`, `N_css_import`).
  ImportHtml(String),
}

/// Build the manifest for a report, with module paths keyed relative to
/// `context_dir`.
pub fn build_manifest(report: &CompilationReport, context_dir: &Path) -> ExportedManifest {
  let mut manifest = ExportedManifest::default();

  for (name, files) in &report.entrypoint_assets {
    let mut js_urls = Vec::new();
    let mut js_import = String::new();
    let mut css_urls = Vec::new();
    let mut css_import = String::new();

    for file_name in files.file_names() {
      let url = format!("{}{}", report.public_path, file_name);
      match file_extension(file_name) {
        Some("js") => {
          js_import.push_str(&format!(r#"<script src="{url}"></script>"#));
          js_urls.push(url);
        }
        Some("css") => {
          css_import.push_str(&format!(r#"<link rel="stylesheet" href="{url}"/>"#));
          css_urls.push(url);
        }
        // Other extensions never contribute to entry-point keys.
        _ => {}
      }
    }

    manifest
      .entrypoints
      .insert(format!("{name}_js"), ManifestValue::Urls(js_urls));
    manifest
      .entrypoints
      .insert(format!("{name}_js_import"), ManifestValue::ImportHtml(js_import));
    manifest
      .entrypoints
      .insert(format!("{name}_css"), ManifestValue::Urls(css_urls));
    manifest
      .entrypoints
      .insert(format!("{name}_css_import"), ManifestValue::ImportHtml(css_import));
  }

  for module in &report.modules {
    // Only modules that emitted exactly one file are recorded.
    if let [asset] = module.assets.as_slice() {
      let key = relative_module_key(&module.name, context_dir);
      manifest
        .assets
        .insert(key, format!("{}{}", report.public_path, asset));
    }
  }

  manifest
}

/// Extension of a file name, taken after the last `.` of its final segment.
fn file_extension(file_name: &str) -> Option<&str> {
  Path::new(file_name).extension().and_then(|ext| ext.to_str())
}

/// Module name relative to the context directory, separator-normalized.
///
/// Names outside the context directory are reached through `..` segments,
/// one per context component left after the shared prefix.
fn relative_module_key(name: &str, context_dir: &Path) -> String {
  let path = Path::new(name);
  let relative = match path.strip_prefix(context_dir) {
    Ok(stripped) => stripped.to_path_buf(),
    Err(_) => relative_to(path, context_dir),
  };
  relative.to_string_lossy().replace('\\', "/")
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
  let path_components: Vec<Component> = path.components().collect();
  let base_components: Vec<Component> = base.components().collect();
  let shared = path_components
    .iter()
    .zip(&base_components)
    .take_while(|(ours, theirs)| ours == theirs)
    .count();

  let mut relative = PathBuf::new();
  for _ in shared..base_components.len() {
    relative.push("..");
  }
  for component in &path_components[shared..] {
    relative.push(component);
  }
  relative
}
