//! Platform trees owned by the build tool.
//!
//! - [`PlatformDestinations`]: where each platform's files live for a brand
//! - [`PlatformRebuilder`]: drops and re-adds all platforms
//! - [`BuildTool`]: the external program that manages the trees

mod rebuilder;
mod tool_detection;

pub use rebuilder::PlatformRebuilder;
pub use tool_detection::BuildTool;

use crate::packager::{Error, Result, settings::ProjectLayout};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Platform identifier to destination root, for one brand.
///
/// Recomputed whenever the current brand changes, since the iOS tree is named
/// after the brand's project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDestinations {
    roots: BTreeMap<String, PathBuf>,
}

impl PlatformDestinations {
    /// Destinations for a project whose brand is named `project_name`.
    ///
    /// - `android`: `platforms/android`
    /// - `ios`: `platforms/ios/<project_name>`
    pub fn for_project(layout: &ProjectLayout, project_name: &str) -> Self {
        let platforms = layout.platforms_dir();
        let mut roots = BTreeMap::new();
        roots.insert("android".to_string(), platforms.join("android"));
        roots.insert("ios".to_string(), platforms.join("ios").join(project_name));
        Self { roots }
    }

    /// Root for `platform`, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownPlatform`] when no mapping exists.
    pub fn root(&self, platform: &str) -> Result<&Path> {
        self.roots
            .get(&platform.to_lowercase())
            .map(PathBuf::as_path)
            .ok_or_else(|| Error::UnknownPlatform {
                platform: platform.to_string(),
            })
    }
}
