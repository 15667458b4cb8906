//! Filesystem layout of a branded Cordova project.

use std::path::{Path, PathBuf};

/// Every path the pipeline touches, derived from the project root.
///
/// ```text
/// <root>/
///   custom/
///     brand -> brands/<name>          current brand pointer
///     brands/<name>/project_config.json
///     elements.json                   customization elements
///     brand_elements.json             manifest bindings
///   platforms/<platform>/             build tool platform trees
///   www/res/icon/                     icon sources
///   .cordova/config.json              fabricated build tool record
/// ```
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Name of the per-brand configuration record.
    pub const PROJECT_CONFIG_FILE: &'static str = "project_config.json";

    /// Suffix appended to a manifest path to locate its template.
    pub const TEMPLATE_SUFFIX: &'static str = ".template";

    /// Creates a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `custom/`
    pub fn custom_dir(&self) -> PathBuf {
        self.root.join("custom")
    }

    /// `custom/brands/`
    pub fn brands_dir(&self) -> PathBuf {
        self.custom_dir().join("brands")
    }

    /// `custom/brand`, the current brand pointer.
    pub fn brand_pointer(&self) -> PathBuf {
        self.custom_dir().join("brand")
    }

    /// Project config of the brand the pointer currently references.
    pub fn current_project_config(&self) -> PathBuf {
        self.brand_pointer().join(Self::PROJECT_CONFIG_FILE)
    }

    /// `custom/elements.json`
    pub fn elements_file(&self) -> PathBuf {
        self.custom_dir().join("elements.json")
    }

    /// `custom/brand_elements.json`
    pub fn brand_elements_file(&self) -> PathBuf {
        self.custom_dir().join("brand_elements.json")
    }

    /// `.cordova/config.json`
    pub fn build_tool_config(&self) -> PathBuf {
        self.root.join(".cordova").join("config.json")
    }

    /// `platforms/`
    pub fn platforms_dir(&self) -> PathBuf {
        self.root.join("platforms")
    }

    /// `www/res/icon/`
    pub fn icon_source_dir(&self) -> PathBuf {
        self.root.join("www").join("res").join("icon")
    }

    /// Resolves a `/`-separated project-relative path.
    ///
    /// Configuration files always use forward slashes regardless of host.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|part| !part.is_empty() && *part != ".")
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    /// Path relative to the project root, for log messages.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
