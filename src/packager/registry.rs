//! Current-brand resolution through the `custom/brand` symlink.
//!
//! The pointer is a relative symlink `custom/brand -> brands/<name>`. Reading
//! it yields a [`BrandPointer`]; [`BrandRegistry::establish`] is the only
//! writer.

use crate::packager::{
    Error, Result,
    error::ErrorExt,
    settings::ProjectLayout,
};
use std::{
    fmt, io,
    path::{Path, PathBuf},
};

/// State of the current-brand pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandPointer {
    /// No symlink at the pointer location.
    Absent,
    /// Symlink present but its target directory is gone.
    Invalid(String),
    /// Symlink resolves to an existing brand directory.
    Valid(String),
}

impl BrandPointer {
    /// Name of the current brand, only when the pointer is valid.
    pub fn valid_name(&self) -> Option<&str> {
        match self {
            Self::Valid(name) => Some(name),
            Self::Absent | Self::Invalid(_) => None,
        }
    }
}

impl fmt::Display for BrandPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("<no link>"),
            Self::Invalid(_) => f.write_str("<bad link>"),
            Self::Valid(name) => f.write_str(name),
        }
    }
}

/// Reads and writes the current-brand pointer.
#[derive(Debug, Clone)]
pub struct BrandRegistry {
    brands_dir: PathBuf,
    pointer: PathBuf,
}

impl BrandRegistry {
    /// Registry over the brands directory and pointer of `layout`.
    pub fn new(layout: &ProjectLayout) -> Self {
        Self {
            brands_dir: layout.brands_dir(),
            pointer: layout.brand_pointer(),
        }
    }

    /// Location of the pointer symlink.
    pub fn pointer_path(&self) -> &Path {
        &self.pointer
    }

    /// Directory holding brand `name`.
    pub fn brand_dir(&self, name: &str) -> PathBuf {
        self.brands_dir.join(name)
    }

    /// Reads the pointer.
    ///
    /// Anything that is not a readable symlink, including a blocking regular
    /// file or directory, reads as [`BrandPointer::Absent`].
    pub async fn current(&self) -> BrandPointer {
        let target = match tokio::fs::read_link(&self.pointer).await {
            Ok(target) => target,
            Err(_) => return BrandPointer::Absent,
        };

        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let resolved = match self.pointer.parent() {
            Some(parent) => parent.join(&target),
            None => target,
        };

        match tokio::fs::metadata(&resolved).await {
            Ok(meta) if meta.is_dir() && !name.is_empty() => BrandPointer::Valid(name),
            _ => BrandPointer::Invalid(name),
        }
    }

    /// Lists brand directories in directory-listing order.
    ///
    /// Hidden entries and plain files are ignored.
    pub async fn list_available(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.brands_dir)
            .await
            .fs_context("listing brands", &self.brands_dir)?;

        let mut brands = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .fs_context("listing brands", &self.brands_dir)?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            // Follows symlinks, so linked brand directories count too.
            if tokio::fs::metadata(entry.path())
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false)
            {
                brands.push(name);
            }
        }
        Ok(brands)
    }

    /// Points the current brand at `name`.
    ///
    /// The new link is created beside the pointer and renamed over it, so the
    /// pointer location is never empty during the swap. Calling this again with
    /// the same name relinks.
    ///
    /// # Errors
    ///
    /// - [`Error::BrandNotFound`] if `custom/brands/<name>` is not a directory
    /// - [`Error::FilesystemConflict`] if a non-symlink occupies the pointer
    /// - [`Error::PointerNotEstablished`] if the pointer does not read back
    pub async fn establish(&self, name: &str) -> Result<()> {
        let brand_dir = self.brand_dir(name);
        let is_brand = tokio::fs::metadata(&brand_dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if matches!(name, "" | "." | "..") || name.contains(['/', '\\']) || !is_brand {
            return Err(Error::BrandNotFound {
                name: name.to_string(),
                path: brand_dir,
            });
        }

        match tokio::fs::symlink_metadata(&self.pointer).await {
            Ok(meta) if !meta.file_type().is_symlink() => {
                return Err(Error::FilesystemConflict {
                    path: self.pointer.clone(),
                });
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).fs_context("inspecting brand pointer", &self.pointer),
        }

        let relative = Path::new("brands").join(name);
        let staging = self.staging_path();
        match tokio::fs::remove_file(&staging).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).fs_context("clearing stale brand link", &staging),
        }

        symlink_dir(&relative, &staging)
            .await
            .fs_context("creating brand link", &staging)?;
        if let Err(e) = tokio::fs::rename(&staging, &self.pointer).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e).fs_context("replacing brand pointer", &self.pointer);
        }

        match tokio::fs::read_link(&self.pointer).await {
            Ok(target) if target == relative => {
                log::debug!("{} -> {}", self.pointer.display(), target.display());
                Ok(())
            }
            _ => Err(Error::PointerNotEstablished {
                path: self.pointer.clone(),
            }),
        }
    }

    fn staging_path(&self) -> PathBuf {
        let file_name = format!(".brand.{}.tmp", std::process::id());
        match self.pointer.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
async fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    tokio::fs::symlink(target, link).await
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
async fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    tokio::fs::symlink_dir(target, link).await
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(brands: &[&str]) -> (TempDir, BrandRegistry) {
        let tmp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        for brand in brands {
            std::fs::create_dir_all(layout.brands_dir().join(brand)).unwrap();
        }
        let registry = BrandRegistry::new(&layout);
        (tmp, registry)
    }

    #[tokio::test]
    async fn absent_until_established() {
        let (_tmp, registry) = project(&["Acme"]);
        assert_eq!(registry.current().await, BrandPointer::Absent);

        registry.establish("Acme").await.unwrap();
        assert_eq!(registry.current().await, BrandPointer::Valid("Acme".into()));
    }

    #[tokio::test]
    async fn establish_is_repeatable() {
        let (_tmp, registry) = project(&["Acme", "Zeta"]);
        registry.establish("Acme").await.unwrap();
        registry.establish("Acme").await.unwrap();
        assert_eq!(registry.current().await.valid_name(), Some("Acme"));

        registry.establish("Zeta").await.unwrap();
        assert_eq!(registry.current().await.valid_name(), Some("Zeta"));
        assert_eq!(
            std::fs::read_link(registry.pointer_path()).unwrap(),
            Path::new("brands/Zeta")
        );
    }

    #[tokio::test]
    async fn missing_brand_is_rejected() {
        let (_tmp, registry) = project(&["Acme"]);
        let err = registry.establish("Nope").await.unwrap_err();
        assert!(matches!(err, Error::BrandNotFound { ref name, .. } if name == "Nope"));
        assert_eq!(registry.current().await, BrandPointer::Absent);
    }

    #[tokio::test]
    async fn dot_names_are_not_brands() {
        let (_tmp, registry) = project(&["Acme"]);
        for name in [".", "..", "Acme/.."] {
            let err = registry.establish(name).await.unwrap_err();
            assert!(matches!(err, Error::BrandNotFound { .. }), "{name}");
        }
        assert_eq!(registry.current().await, BrandPointer::Absent);
    }

    #[tokio::test]
    async fn blocking_directory_is_a_conflict() {
        let (_tmp, registry) = project(&["Acme"]);
        std::fs::create_dir_all(registry.pointer_path()).unwrap();

        let err = registry.establish("Acme").await.unwrap_err();
        assert!(matches!(err, Error::FilesystemConflict { .. }));
        assert!(registry.pointer_path().is_dir());
    }

    #[tokio::test]
    async fn deleted_target_reads_invalid() {
        let (_tmp, registry) = project(&["Acme"]);
        registry.establish("Acme").await.unwrap();
        std::fs::remove_dir_all(registry.brand_dir("Acme")).unwrap();

        let pointer = registry.current().await;
        assert_eq!(pointer, BrandPointer::Invalid("Acme".into()));
        assert_eq!(pointer.to_string(), "<bad link>");
        assert_eq!(pointer.valid_name(), None);
    }

    #[tokio::test]
    async fn lists_only_visible_directories() {
        let (tmp, registry) = project(&["Acme", "Zeta", ".hidden"]);
        std::fs::write(tmp.path().join("custom/brands/README"), "notes").unwrap();

        let mut brands = registry.list_available().await.unwrap();
        brands.sort();
        assert_eq!(brands, ["Acme", "Zeta"]);
    }
}
