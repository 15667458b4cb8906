//! Launcher icon provisioning from `www/res/icon`.

use super::CopyReport;
use crate::packager::{
    Result,
    platform::PlatformDestinations,
    settings::ProjectLayout,
    utils::fs,
};
use std::path::PathBuf;
use tokio::task::JoinSet;

/// Android icons: source file, density folder under `res/`. Each lands as
/// `icon.png`.
pub const ANDROID_ICONS: [(&str, &str); 5] = [
    ("cordova_android_96.png", "drawable"),
    ("cordova_android_72.png", "drawable-hdpi"),
    ("cordova_android_36.png", "drawable-ldpi"),
    ("cordova_android_48.png", "drawable-mdpi"),
    ("cordova_android_96.png", "drawable-xhdpi"),
];

/// iOS icons: source file, file name under `Resources/icons/`.
pub const IOS_ICONS: [(&str, &str); 4] = [
    ("cordova_ios_57.png", "icon.png"),
    ("cordova_ios_114.png", "icon@2x.png"),
    ("cordova_ios_72.png", "icon-72.png"),
    ("cordova_ios_144.png", "icon-72@2x.png"),
];

/// Copies the icon tables into prepared platform trees.
#[derive(Debug)]
pub struct IconProvisioner<'a> {
    layout: &'a ProjectLayout,
    destinations: &'a PlatformDestinations,
}

impl<'a> IconProvisioner<'a> {
    /// Provisioner for one brand's destinations.
    pub fn new(layout: &'a ProjectLayout, destinations: &'a PlatformDestinations) -> Self {
        Self {
            layout,
            destinations,
        }
    }

    /// Copies every icon whose source and destination directory exist.
    pub async fn provision(&self) -> Result<CopyReport> {
        let mut report = CopyReport::default();
        let source_dir = self.layout.icon_source_dir();
        if !fs::is_dir(&source_dir).await {
            log::info!(
                "No icon sources at {}, skipping",
                self.layout.relative(&source_dir).display()
            );
            return Ok(report);
        }

        let mut planned: Vec<(PathBuf, PathBuf)> = Vec::new();

        let android_res = self.destinations.root("android")?.join("res");
        if fs::is_dir(&android_res).await {
            for (file, density) in ANDROID_ICONS {
                planned.push((source_dir.join(file), android_res.join(density).join("icon.png")));
            }
        }

        let ios_icons = self.destinations.root("ios")?.join("Resources").join("icons");
        if fs::is_dir(&ios_icons).await {
            for (file, name) in IOS_ICONS {
                planned.push((source_dir.join(file), ios_icons.join(name)));
            }
        }

        let mut copies = JoinSet::new();
        for (from, to) in planned {
            let target_dir_ready = match to.parent() {
                Some(parent) => fs::is_dir(parent).await,
                None => false,
            };
            if !fs::exists(&from).await || !target_dir_ready {
                log::warn!(
                    "Skipping icon {} => {}",
                    self.layout.relative(&from).display(),
                    self.layout.relative(&to).display()
                );
                report.skipped += 1;
                continue;
            }
            log::debug!("icon {} => {}", from.display(), to.display());
            copies.spawn(async move {
                fs::stream_copy(&from, &to).await?;
                Ok::<_, crate::packager::Error>(to)
            });
        }

        let mut first_error = None;
        while let Some(joined) = copies.join_next().await {
            match joined {
                Ok(Ok(path)) => report.copied.push(path),
                Ok(Err(e)) => {
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    first_error.get_or_insert(e.into());
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                log::info!("Provisioned {} icons", report.copied.len());
                Ok(report)
            }
        }
    }
}
