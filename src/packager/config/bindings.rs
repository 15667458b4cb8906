//! Manifest template bindings from `brand_elements.json`.
//!
//! ```json
//! [
//!   ["www/config.xml", [["projectName", "name"],
//!                       ["identifier", ".", "id"]]],
//!   ["www/res/config/Acme-Info.plist", [["identifier", "CFBundleIdentifier"]]]
//! ]
//! ```

use crate::packager::Result;
use serde::Deserialize;
use std::path::Path;

/// One substitution: brand `field` into the node at `selector`.
///
/// Without an `attribute` the node's text is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct FieldBinding {
    /// Brand configuration field supplying the value.
    pub field: String,
    /// Location in the template: element path for XML, key for plist.
    pub selector: String,
    /// Attribute receiving the value.
    pub attribute: Option<String>,
}

impl TryFrom<Vec<String>> for FieldBinding {
    type Error = String;

    fn try_from(parts: Vec<String>) -> std::result::Result<Self, Self::Error> {
        let count = parts.len();
        let mut parts = parts.into_iter();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(field), Some(selector), attribute) if count <= 3 => Ok(Self {
                field,
                selector,
                attribute: attribute.filter(|a| !a.is_empty()),
            }),
            _ => Err(format!(
                "binding must be [field, selector] or [field, selector, attribute], got {count} items"
            )),
        }
    }
}

/// A manifest to fabricate and the bindings applied to its template.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(String, Vec<FieldBinding>)")]
pub struct ManifestSpec {
    /// Output path relative to the project root, `/`-separated.
    pub output: String,
    /// Bindings in application order.
    pub bindings: Vec<FieldBinding>,
}

impl From<(String, Vec<FieldBinding>)> for ManifestSpec {
    fn from((output, bindings): (String, Vec<FieldBinding>)) -> Self {
        Self { output, bindings }
    }
}

/// Loads the manifest list.
pub async fn load_manifest_specs(path: &Path) -> Result<Vec<ManifestSpec>> {
    super::read_json(path).await
}
