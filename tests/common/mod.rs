//! Shared fixture: a minimal branded project with a stub build tool.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CONFIG_TEMPLATE: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<widget id="com.example.placeholder" version="1.0.0">
    <name>Placeholder</name>
    <description>Placeholder</description>
</widget>
"#;

pub const INFO_PLIST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
  <key>CFBundleIdentifier</key>
  <string>com.example.placeholder</string>
  <key>CFBundleDisplayName</key>
  <string>Placeholder</string>
</dict>
</plist>
"#;

/// Records its arguments in `tool.log` and creates or removes platform dirs.
pub const STUB_TOOL: &str = r#"#!/bin/sh
echo "$*" >> tool.log
[ "$1" = "platform" ] || exit 0
verb="$2"
shift 2
for p in "$@"; do
  case "$verb" in
    remove) rm -rf "platforms/$p" ;;
    add) mkdir -p "platforms/$p" ;;
  esac
done
"#;

pub struct Project {
    pub dir: TempDir,
}

impl Project {
    /// Project with brands `SpiderOak`, `Acme` and `Zed`, no current brand.
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().unwrap(),
        };
        project.brand("SpiderOak", "com.spideroak.app", "SpiderOak");
        project.brand("Acme", "com.acme.app", "Acme");
        project.brand("Zed", "com.zed.app", "Zed");
        project.write(
            "custom/brand_elements.json",
            r#"[["www/config.xml", [["projectName", "name"],
                                    ["description", "description"],
                                    ["identifier", ".", "id"]]],
                ["www/res/config/Info.plist", [["identifier", "CFBundleIdentifier"],
                                               ["projectName", "CFBundleDisplayName"]]]]"#,
        );
        project.write("www/config.xml.template", CONFIG_TEMPLATE);
        project.write("www/res/config/Info.plist.template", INFO_PLIST_TEMPLATE);
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).unwrap()
    }

    pub fn brand(&self, name: &str, identifier: &str, project_name: &str) {
        self.write(
            &format!("custom/brands/{name}/project_config.json"),
            &format!(
                r#"{{"identifier": "{identifier}", "projectName": "{project_name}",
                    "description": "{project_name} secure files"}}"#
            ),
        );
    }

    /// Target of `custom/brand`, if it is a symlink.
    pub fn pointer(&self) -> Option<PathBuf> {
        std::fs::read_link(self.path("custom/brand")).ok()
    }

    /// Lines the stub tool logged.
    pub fn tool_log(&self) -> Vec<String> {
        std::fs::read_to_string(self.path("tool.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Installs the stub build tool and returns its path.
    #[cfg(unix)]
    pub fn stub_tool(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.path("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let tool = bin.join("cordova");
        std::fs::write(&tool, STUB_TOOL).unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
        tool
    }
}
