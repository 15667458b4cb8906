//! Core Settings struct.

use super::ProjectLayout;

/// Brand established when priming a project with no current brand.
pub const DEFAULT_BRAND: &str = "SpiderOak";

/// Build tool used to remove and add platforms.
pub const DEFAULT_BUILD_TOOL: &str = "cordova";

/// Platforms added when a project has none yet.
pub fn default_platforms() -> Vec<String> {
    vec!["ios".to_string(), "android".to_string()]
}

/// Main settings for packaging operations.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder).
#[derive(Debug, Clone)]
pub struct Settings {
    /// Project paths.
    layout: ProjectLayout,

    /// Brand used by priming.
    default_brand: String,

    /// Platforms added when none exist.
    default_platforms: Vec<String>,

    /// Build tool program name or path.
    build_tool: String,
}

impl Settings {
    /// Returns the project layout.
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Returns the brand established by priming.
    pub fn default_brand(&self) -> &str {
        &self.default_brand
    }

    /// Returns the fallback platform set.
    pub fn default_platforms(&self) -> &[String] {
        &self.default_platforms
    }

    /// Returns the build tool program.
    pub fn build_tool(&self) -> &str {
        &self.build_tool
    }

    pub(super) fn new(
        layout: ProjectLayout,
        default_brand: String,
        default_platforms: Vec<String>,
        build_tool: String,
    ) -> Self {
        Self {
            layout,
            default_brand,
            default_platforms,
            build_tool,
        }
    }
}
