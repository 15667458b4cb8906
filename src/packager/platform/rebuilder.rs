//! Platform tree recreation.
//!
//! Platforms are always removed and added as one set. A failure in either step
//! stops the pipeline; no attempt is made to repair a half-built set.

use super::BuildTool;
use crate::packager::{Result, settings::Settings, utils::fs};

/// Removes and re-adds the project's platforms through the build tool.
#[derive(Debug)]
pub struct PlatformRebuilder<'a> {
    settings: &'a Settings,
    tool: BuildTool,
}

impl<'a> PlatformRebuilder<'a> {
    /// Rebuilder using the build tool named in `settings`.
    pub fn new(settings: &'a Settings) -> Result<Self> {
        let tool = BuildTool::locate(settings.build_tool())?;
        Ok(Self { settings, tool })
    }

    /// Existing platform directories, hidden entries and plain files
    /// (`platforms.json`) excluded, sorted.
    pub async fn existing_platforms(&self) -> Result<Vec<String>> {
        let platforms_dir = self.settings.layout().platforms_dir();
        let mut platforms = Vec::new();
        for name in fs::list_dir(&platforms_dir).await? {
            if !name.starts_with('.') && fs::is_dir(&platforms_dir.join(&name)).await {
                platforms.push(name);
            }
        }
        platforms.sort();
        Ok(platforms)
    }

    /// Removes existing platforms, then adds them back.
    ///
    /// With no existing platforms the configured default set is added.
    /// Returns the platform set that was added.
    pub async fn rebuild(&self) -> Result<Vec<String>> {
        let root = self.settings.layout().root();
        let existing = self.existing_platforms().await?;

        let platforms = if existing.is_empty() {
            log::info!("No cordova platforms present");
            self.settings.default_platforms().to_vec()
        } else {
            let remove = platform_command("remove", &existing);
            log::info!(
                "Removing existing cordova platforms: {}",
                self.tool.describe(&remove)
            );
            self.tool.run(root, &remove).await?;
            existing
        };

        let add = platform_command("add", &platforms);
        log::info!("Recreating cordova platforms: {}", self.tool.describe(&add));
        self.tool.run(root, &add).await?;
        Ok(platforms)
    }
}

fn platform_command(verb: &str, platforms: &[String]) -> Vec<String> {
    let mut args = vec!["platform".to_string(), verb.to_string()];
    args.extend(platforms.iter().cloned());
    args
}
