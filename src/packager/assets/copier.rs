//! Copies customization elements into platform trees.

use super::{ActionContext, ActionRegistry, CopyReport};
use crate::packager::{
    Error, Result,
    config::{ElementList, ElementSpec, ElementTarget, SourceMatcher},
    platform::PlatformDestinations,
    settings::ProjectLayout,
    utils::fs,
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use tokio::task::JoinSet;

/// Applies customization elements to every prepared platform.
#[derive(Debug)]
pub struct AssetCopier<'a> {
    layout: &'a ProjectLayout,
    destinations: &'a PlatformDestinations,
    actions: &'a ActionRegistry,
}

impl<'a> AssetCopier<'a> {
    /// Copier for one brand's destinations.
    pub fn new(
        layout: &'a ProjectLayout,
        destinations: &'a PlatformDestinations,
        actions: &'a ActionRegistry,
    ) -> Self {
        Self {
            layout,
            destinations,
            actions,
        }
    }

    /// Applies every element in declaration order.
    pub async fn apply(&self, elements: &ElementList) -> Result<CopyReport> {
        let mut report = CopyReport::default();
        for element in &elements.items {
            self.apply_element(element, &mut report).await?;
        }
        Ok(report)
    }

    /// Applies one element to each platform it lists.
    ///
    /// Copies for the element run concurrently and are all joined before this
    /// returns. When several matches land on the same destination, the last
    /// one in listing order is the only one copied.
    pub async fn apply_element(&self, element: &ElementSpec, report: &mut CopyReport) -> Result<()> {
        let planned = self.plan(element, report).await?;

        let mut copies = JoinSet::new();
        for (from, to) in planned {
            copies.spawn(async move {
                fs::stream_copy(&from, &to).await?;
                Ok::<_, Error>(to)
            });
        }

        let mut copy_error = None;
        while let Some(joined) = copies.join_next().await {
            match joined.map_err(Error::from).and_then(|copied| copied) {
                Ok(path) => report.copied.push(path),
                Err(e) => {
                    log::error!("Copy for '{}' failed: {}", element.source_name, e);
                    copy_error.get_or_insert(e);
                }
            }
        }

        match copy_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Resolves the copies for `element` and dispatches its actions.
    ///
    /// Returns `(from, to)` pairs with unique destinations.
    async fn plan(
        &self,
        element: &ElementSpec,
        report: &mut CopyReport,
    ) -> Result<Vec<(PathBuf, PathBuf)>> {
        let source_dir = self.layout.resolve(&element.source_dir);
        let mut matches: Option<Vec<String>> = None;
        let mut planned: Vec<(PathBuf, PathBuf)> = Vec::new();
        let mut by_target: HashMap<PathBuf, usize> = HashMap::new();

        for platform in &element.platforms {
            let root = self.destinations.root(platform)?;
            if !fs::is_dir(root).await {
                log::info!("Skipping not-yet existent platform {}", platform);
                continue;
            }

            if matches.is_none() {
                matches = Some(matches_in_dir(&element.source, &source_dir).await?);
            }
            let names = matches.as_deref().unwrap_or_default();
            if names.is_empty() {
                log::debug!(
                    "No source for optional element '{}' in {}",
                    element.source_name,
                    self.layout.relative(&source_dir).display()
                );
            }

            for name in names {
                match &element.target {
                    ElementTarget::Folder(folder) => {
                        let dest_dir = join_relative(root, folder);
                        if !fs::is_dir(&dest_dir).await {
                            log::warn!(
                                "Skipping missing {} destination dir for item {}: {}",
                                platform,
                                name,
                                dest_dir.display()
                            );
                            report.skipped += 1;
                            continue;
                        }

                        let from = source_dir.join(name);
                        let to = dest_dir.join(element.target_name.as_deref().unwrap_or(name));
                        log::info!(
                            "({}) {} => {}",
                            platform,
                            name,
                            self.layout.relative(&to).display()
                        );
                        match by_target.get(&to) {
                            Some(&index) => {
                                log::debug!("{} supersedes earlier match for {}", name, to.display());
                                planned[index].0 = from;
                            }
                            None => {
                                by_target.insert(to.clone(), planned.len());
                                planned.push((from, to));
                            }
                        }
                    }
                    ElementTarget::Action(action) => {
                        self.actions.dispatch(&ActionContext {
                            action,
                            source_dir: &source_dir,
                            source_name: name,
                            platform,
                            platform_root: root,
                        })?;
                        report.actions += 1;
                    }
                }
            }
        }
        Ok(planned)
    }
}

/// Regular files in `dir` selected by `matcher`, in listing order.
///
/// A missing directory has no matches.
async fn matches_in_dir(matcher: &SourceMatcher, dir: &Path) -> Result<Vec<String>> {
    let mut found = Vec::new();
    for name in fs::list_dir(dir).await? {
        if matcher.matches(&name) && is_file(&dir.join(&name)).await {
            found.push(name);
        }
    }
    Ok(found)
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

fn join_relative(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        tmp: TempDir,
        layout: ProjectLayout,
        destinations: PlatformDestinations,
        actions: ActionRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let layout = ProjectLayout::new(tmp.path());
            let destinations = PlatformDestinations::for_project(&layout, "Acme");
            let source = tmp.path().join("custom/brands/Acme/elements");
            std::fs::create_dir_all(&source).unwrap();
            std::fs::write(source.join("logo.png"), b"logo").unwrap();
            std::fs::write(source.join("splash-land.png"), b"land").unwrap();
            std::fs::write(source.join("splash-port.png"), b"port").unwrap();
            std::fs::write(source.join("push.p12"), b"cert").unwrap();
            Self {
                tmp,
                layout,
                destinations,
                actions: ActionRegistry::builtin(),
            }
        }

        fn mkdir(&self, rel: &str) -> PathBuf {
            let dir = self.tmp.path().join(rel);
            std::fs::create_dir_all(&dir).unwrap();
            dir
        }

        fn elements(&self, json: &str) -> ElementList {
            ElementList::from_json(Path::new("elements.json"), json, &self.actions).unwrap()
        }

        async fn apply(&self, json: &str) -> Result<CopyReport> {
            AssetCopier::new(&self.layout, &self.destinations, &self.actions)
                .apply(&self.elements(json))
                .await
        }
    }

    #[tokio::test]
    async fn copies_exact_and_pattern_matches() {
        let fx = Fixture::new();
        let drawable = fx.mkdir("platforms/android/res/drawable");
        let splash = fx.mkdir("platforms/ios/Acme/Resources/splash");

        let report = fx
            .apply(
                r#"{ "GetCustomElementsFrom": "custom/brands/Acme/elements", "Items": [
                    { "SourceFileName": "logo.png", "TargetFileName": "icon.png",
                      "TargetFolder": "res/drawable", "Platforms": ["Android"] },
                    { "SourceFileName": "^splash-", "TargetFolder": "Resources/splash",
                      "Platforms": ["iOS"] } ] }"#,
            )
            .await
            .unwrap();

        assert_eq!(report.copied.len(), 3);
        assert_eq!(std::fs::read(drawable.join("icon.png")).unwrap(), b"logo");
        assert_eq!(std::fs::read(splash.join("splash-land.png")).unwrap(), b"land");
        assert_eq!(std::fs::read(splash.join("splash-port.png")).unwrap(), b"port");
    }

    #[tokio::test]
    async fn absent_platform_root_is_skipped() {
        let fx = Fixture::new();
        let report = fx
            .apply(
                r#"{ "GetCustomElementsFrom": "custom/brands/Acme/elements", "Items": [
                    { "SourceFileName": "logo.png", "TargetFolder": "res/drawable",
                      "Platforms": ["android", "ios"] } ] }"#,
            )
            .await
            .unwrap();
        assert_eq!(report, CopyReport::default());
    }

    #[tokio::test]
    async fn unknown_platform_is_fatal() {
        let fx = Fixture::new();
        let err = fx
            .apply(
                r#"{ "GetCustomElementsFrom": "custom/brands/Acme/elements", "Items": [
                    { "SourceFileName": "logo.png", "TargetFolder": "res",
                      "Platforms": ["Windows"] } ] }"#,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPlatform { ref platform } if platform == "Windows"));
    }

    #[tokio::test]
    async fn missing_destination_dir_skips_copy() {
        let fx = Fixture::new();
        fx.mkdir("platforms/android");
        let report = fx
            .apply(
                r#"{ "GetCustomElementsFrom": "custom/brands/Acme/elements", "Items": [
                    { "SourceFileName": "logo.png", "TargetFolder": "res/drawable-xxhdpi",
                      "Platforms": ["android"] } ] }"#,
            )
            .await
            .unwrap();
        assert!(report.copied.is_empty());
        assert_eq!(report.skipped, 1);
    }

    #[tokio::test]
    async fn no_match_is_not_an_error() {
        let fx = Fixture::new();
        fx.mkdir("platforms/android/res");
        let report = fx
            .apply(
                r#"{ "GetCustomElementsFrom": "custom/brands/Acme/missing", "Items": [
                    { "SourceFileName": "logo.png", "TargetFolder": "res",
                      "Platforms": ["android"] } ] }"#,
            )
            .await
            .unwrap();
        assert_eq!(report, CopyReport::default());
    }

    #[tokio::test]
    async fn actions_are_dispatched_per_match() {
        let fx = Fixture::new();
        fx.mkdir("platforms/ios/Acme");
        let report = fx
            .apply(
                r#"{ "GetCustomElementsFrom": "custom/brands/Acme/elements", "Items": [
                    { "SourceFileName": "push.p12", "TargetAction": "iOSaddCertificate",
                      "Platforms": ["iOS"] } ] }"#,
            )
            .await
            .unwrap();
        assert_eq!(report.actions, 1);
        assert!(report.copied.is_empty());
    }

    #[tokio::test]
    async fn shared_target_name_keeps_last_match() {
        let fx = Fixture::new();
        let splash = fx.mkdir("platforms/ios/Acme/Resources/splash");
        let report = fx
            .apply(
                r#"{ "GetCustomElementsFrom": "custom/brands/Acme/elements", "Items": [
                    { "SourceFileName": "^splash-", "TargetFileName": "Default.png",
                      "TargetFolder": "Resources/splash", "Platforms": ["ios", "iOS"] } ] }"#,
            )
            .await
            .unwrap();

        assert_eq!(report.copied, [splash.join("Default.png")]);
        let content = std::fs::read(splash.join("Default.png")).unwrap();
        assert!(content == b"land" || content == b"port");
        assert_eq!(std::fs::read_dir(&splash).unwrap().count(), 1);
    }

    #[test]
    fn join_relative_splits_folders() {
        assert_eq!(
            join_relative(Path::new("/root"), "res/drawable-hdpi/"),
            Path::new("/root/res/drawable-hdpi")
        );
    }
}
