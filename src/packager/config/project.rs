//! Brand project configuration.

use crate::packager::{Error, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Field values of one brand, read from its `project_config.json`.
///
/// Besides `identifier`, `projectName` and `description`, any other key may be
/// present and referenced by template bindings.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl ProjectConfig {
    /// Loads the configuration at `path`. The top level must be an object.
    pub async fn load(path: &Path) -> Result<Self> {
        let fields: Map<String, Value> = super::read_json(path).await?;
        Ok(Self::from_fields(path, fields))
    }

    /// Wraps already-parsed fields.
    pub fn from_fields(path: impl Into<PathBuf>, fields: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    /// File the configuration was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// String form of `name`, or `None` when absent or null.
    ///
    /// Non-string scalars are rendered as JSON text (`42`, `true`).
    pub fn field(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Application identifier, e.g. `com.acme.app`.
    pub fn identifier(&self) -> Option<String> {
        self.field("identifier")
    }

    /// Display and project name.
    pub fn project_name(&self) -> Option<String> {
        self.field("projectName")
    }

    /// Project name, required wherever it names a directory.
    pub fn require_project_name(&self) -> Result<String> {
        self.project_name().ok_or_else(|| Error::Configuration {
            path: self.path.clone(),
            reason: "missing 'projectName'".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> ProjectConfig {
        match value {
            Value::Object(fields) => ProjectConfig::from_fields("project_config.json", fields),
            _ => unreachable!(),
        }
    }

    #[test]
    fn scalar_fields_render_as_text() {
        let cfg = config(json!({
            "identifier": "com.acme.app",
            "projectName": "Acme",
            "versionCode": 42,
            "beta": true,
            "nothing": null
        }));
        assert_eq!(cfg.identifier().as_deref(), Some("com.acme.app"));
        assert_eq!(cfg.project_name().as_deref(), Some("Acme"));
        assert_eq!(cfg.field("versionCode").as_deref(), Some("42"));
        assert_eq!(cfg.field("beta").as_deref(), Some("true"));
        assert_eq!(cfg.field("nothing"), None);
        assert_eq!(cfg.field("missing"), None);
    }

    #[test]
    fn project_name_required_for_paths() {
        let cfg = config(json!({ "identifier": "com.acme.app" }));
        assert!(matches!(
            cfg.require_project_name(),
            Err(Error::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn non_object_is_a_configuration_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("project_config.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            ProjectConfig::load(&path).await,
            Err(Error::Configuration { .. })
        ));
    }
}
