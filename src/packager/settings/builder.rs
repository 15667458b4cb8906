//! Builder for constructing Settings.

use super::{DEFAULT_BRAND, DEFAULT_BUILD_TOOL, ProjectLayout, Settings, default_platforms};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use brand_packager::packager::SettingsBuilder;
///
/// # fn example() -> brand_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("/work/mobile-client")
///     .default_brand("Acme")
///     .build()?;
/// assert_eq!(settings.default_brand(), "Acme");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_root: Option<PathBuf>,
    default_brand: Option<String>,
    default_platforms: Option<Vec<String>>,
    build_tool: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the brand used by priming.
    ///
    /// Default: [`DEFAULT_BRAND`]
    pub fn default_brand(mut self, name: impl Into<String>) -> Self {
        self.default_brand = Some(name.into());
        self
    }

    /// Sets the platforms added when the project has none.
    ///
    /// Default: `ios android`
    pub fn default_platforms(mut self, platforms: Vec<String>) -> Self {
        self.default_platforms = Some(platforms);
        self
    }

    /// Sets the build tool program name or path.
    ///
    /// Default: [`DEFAULT_BUILD_TOOL`]
    pub fn build_tool(mut self, tool: impl Into<String>) -> Self {
        self.build_tool = Some(tool.into());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `project_root` is missing or the default brand or
    /// platform set is empty.
    pub fn build(self) -> crate::packager::Result<Settings> {
        use crate::packager::error::Context;

        let root = self.project_root.context("project_root is required")?;
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(root)
        };

        let default_brand = self.default_brand.unwrap_or_else(|| DEFAULT_BRAND.to_string());
        if default_brand.is_empty() {
            crate::bail!("default brand cannot be empty");
        }

        let default_platforms = self.default_platforms.unwrap_or_else(default_platforms);
        if default_platforms.is_empty() {
            crate::bail!("default platform set cannot be empty");
        }

        Ok(Settings::new(
            ProjectLayout::new(root),
            default_brand,
            default_platforms,
            self.build_tool.unwrap_or_else(|| DEFAULT_BUILD_TOOL.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let settings = SettingsBuilder::new().project_root("/proj").build().unwrap();
        assert_eq!(settings.default_brand(), DEFAULT_BRAND);
        assert_eq!(settings.build_tool(), DEFAULT_BUILD_TOOL);
        assert_eq!(settings.default_platforms(), ["ios", "android"]);
        assert_eq!(settings.layout().root(), Path::new("/proj"));
    }

    #[test]
    fn project_root_is_required() {
        assert!(SettingsBuilder::new().build().is_err());
    }

    #[test]
    fn relative_root_is_absolutized() {
        let settings = SettingsBuilder::new().project_root(".").build().unwrap();
        assert!(settings.layout().root().is_absolute());
    }

    #[test]
    fn empty_platform_set_rejected() {
        let result = SettingsBuilder::new()
            .project_root("/proj")
            .default_platforms(vec![])
            .build();
        assert!(result.is_err());
    }
}
