//! Customization elements from `custom/elements.json`.
//!
//! ```json
//! {
//!   "GetCustomElementsFrom": "custom/brand/elements",
//!   "Items": [
//!     { "SourceFileName": "^splash.*\\.png$", "TargetFolder": "res/drawable",
//!       "Platforms": ["Android"] },
//!     { "SourceFileName": "push.p12", "TargetAction": "iOSaddCertificate",
//!       "Platforms": ["iOS"] }
//!   ]
//! }
//! ```
//!
//! Every element is validated while loading: it needs a source directory, a
//! target folder or action, and any action must be registered.

use crate::packager::{Error, Result, assets::ActionRegistry};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawElementList {
    #[serde(default)]
    get_custom_elements_from: Option<String>,
    #[serde(default)]
    items: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawElement {
    source_file_name: String,
    #[serde(default)]
    target_file_name: Option<String>,
    #[serde(default)]
    target_folder: Option<String>,
    #[serde(default)]
    target_action: Option<String>,
    #[serde(default)]
    platforms: Vec<String>,
    #[serde(default)]
    get_custom_elements_from: Option<String>,
}

/// How an element's source name selects files.
#[derive(Debug, Clone)]
pub enum SourceMatcher {
    /// Exact file name.
    Exact(String),
    /// Names starting with `^` are regular expressions.
    Pattern(Regex),
}

impl SourceMatcher {
    /// Builds a matcher from a declared source name.
    pub fn parse(source: &str) -> Result<Self> {
        if source.starts_with('^') {
            Ok(Self::Pattern(Regex::new(source)?))
        } else {
            Ok(Self::Exact(source.to_string()))
        }
    }

    /// Whether directory entry `name` is selected.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(expected) => name == expected,
            Self::Pattern(re) => re.is_match(name),
        }
    }
}

/// Where matched files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementTarget {
    /// Folder relative to the platform root, `/`-separated.
    Folder(String),
    /// Registered action invoked per matched file.
    Action(String),
}

/// One validated customization element.
#[derive(Debug, Clone)]
pub struct ElementSpec {
    /// Source file selection.
    pub source: SourceMatcher,
    /// Declared source name, for messages.
    pub source_name: String,
    /// Renamed target; defaults to each matched file's own name.
    pub target_name: Option<String>,
    /// Copy destination or action.
    pub target: ElementTarget,
    /// Platforms as written; compared case-insensitively.
    pub platforms: Vec<String>,
    /// Source directory relative to the project root, `/`-separated.
    pub source_dir: String,
}

/// Validated contents of `elements.json`.
#[derive(Debug, Clone, Default)]
pub struct ElementList {
    /// Elements in declaration order.
    pub items: Vec<ElementSpec>,
}

impl ElementList {
    /// Loads and validates the element list at `path` against `actions`.
    pub async fn load(path: &Path, actions: &ActionRegistry) -> Result<Self> {
        let raw: RawElementList = super::read_json(path).await?;
        Self::validate(path, raw, actions)
    }

    /// Parses and validates an element list from JSON text.
    pub fn from_json(path: &Path, json: &str, actions: &ActionRegistry) -> Result<Self> {
        let raw = serde_json::from_str(json).map_err(|e| Error::Configuration {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::validate(path, raw, actions)
    }

    fn validate(path: &Path, raw: RawElementList, actions: &ActionRegistry) -> Result<Self> {
        let config_error = |reason: String| Error::Configuration {
            path: path.to_path_buf(),
            reason,
        };

        let mut items = Vec::with_capacity(raw.items.len());
        for item in raw.items {
            let target = match (item.target_folder, item.target_action) {
                (Some(folder), _) => ElementTarget::Folder(folder),
                (None, Some(action)) => {
                    if !actions.contains(&action) {
                        return Err(Error::UnknownAction { action });
                    }
                    ElementTarget::Action(action)
                }
                (None, None) => {
                    return Err(config_error(format!(
                        "entry '{}' must have either a TargetFolder or TargetAction",
                        item.source_file_name
                    )));
                }
            };

            let source_dir = item
                .get_custom_elements_from
                .or_else(|| raw.get_custom_elements_from.clone())
                .ok_or_else(|| {
                    config_error(format!(
                        "entry '{}' has no GetCustomElementsFrom and no default is set",
                        item.source_file_name
                    ))
                })?;

            items.push(ElementSpec {
                source: SourceMatcher::parse(&item.source_file_name)?,
                source_name: item.source_file_name,
                target_name: item.target_file_name.filter(|n| !n.is_empty()),
                target,
                platforms: item.platforms,
                source_dir,
            });
        }

        Ok(Self { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(json: &str) -> Result<ElementList> {
        ElementList::from_json(Path::new("elements.json"), json, &ActionRegistry::builtin())
    }

    #[test]
    fn item_source_dir_overrides_default() {
        let list = load(
            r#"{
                "GetCustomElementsFrom": "custom/brand/elements",
                "Items": [
                    { "SourceFileName": "logo.png", "TargetFolder": "res/drawable",
                      "Platforms": ["Android"] },
                    { "SourceFileName": "^splash", "TargetFolder": "Resources/splash",
                      "TargetFileName": "Default.png", "Platforms": ["iOS"],
                      "GetCustomElementsFrom": "www/res/screen" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].source_dir, "custom/brand/elements");
        assert_eq!(list.items[1].source_dir, "www/res/screen");
        assert_eq!(list.items[1].target_name.as_deref(), Some("Default.png"));
        assert!(matches!(list.items[1].source, SourceMatcher::Pattern(_)));
    }

    #[test]
    fn folder_wins_over_action() {
        let list = load(
            r#"{ "GetCustomElementsFrom": "x", "Items": [
                { "SourceFileName": "a", "TargetFolder": "f", "TargetAction": "bogus",
                  "Platforms": [] } ] }"#,
        )
        .unwrap();
        assert_eq!(list.items[0].target, ElementTarget::Folder("f".into()));
    }

    #[test]
    fn unknown_action_fails_at_load() {
        let err = load(
            r#"{ "GetCustomElementsFrom": "x", "Items": [
                { "SourceFileName": "a", "TargetAction": "launchRockets", "Platforms": ["iOS"] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownAction { ref action } if action == "launchRockets"));
    }

    #[test]
    fn element_without_target_fails() {
        let err = load(
            r#"{ "GetCustomElementsFrom": "x", "Items": [
                { "SourceFileName": "a", "Platforms": ["iOS"] } ] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("TargetFolder or TargetAction"));
    }

    #[test]
    fn element_without_source_dir_fails() {
        let err = load(r#"{ "Items": [ { "SourceFileName": "a", "TargetFolder": "f" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn pattern_and_exact_matching() {
        let exact = SourceMatcher::parse("icon.png").unwrap();
        assert!(exact.matches("icon.png"));
        assert!(!exact.matches("icon.png.bak"));

        let pattern = SourceMatcher::parse(r"^icon-\d+\.png").unwrap();
        assert!(pattern.matches("icon-72.png"));
        assert!(!pattern.matches("my-icon-72.png"));
    }

    #[test]
    fn bad_pattern_is_reported() {
        assert!(matches!(SourceMatcher::parse("^(unclosed"), Err(Error::Pattern(_))));
    }
}
