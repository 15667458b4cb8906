//! Declarative inputs of the pipeline.
//!
//! - [`ProjectConfig`]: per-brand `project_config.json`
//! - [`ElementList`]: `custom/elements.json`, files copied into platform trees
//! - [`ManifestSpec`]: entries of `custom/brand_elements.json`, template bindings

mod bindings;
mod elements;
mod project;

pub use bindings::{FieldBinding, ManifestSpec, load_manifest_specs};
pub use elements::{ElementList, ElementSpec, ElementTarget, SourceMatcher};
pub use project::ProjectConfig;

use crate::packager::{Error, Result, error::ErrorExt};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Reads and deserializes a JSON configuration file.
///
/// Shape mismatches are reported as [`Error::Configuration`] naming the file.
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .fs_context("reading configuration", path)?;
    serde_json::from_str(&content).map_err(|e| Error::Configuration {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
