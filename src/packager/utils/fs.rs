//! File system utilities for the packaging pipeline.
//!
//! Writes that produce artifacts consumed by later packaging steps go through
//! a temporary sibling and a rename, so readers see either the old or the new
//! file and never a partial one.

use crate::packager::{Result, error::ErrorExt};
use std::{
    io,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};
use tokio::{
    fs,
    io::{AsyncWriteExt, BufReader, BufWriter},
};

/// Whether `path` exists, following symlinks.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Whether `path` is a directory, following symlinks.
pub async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false)
}

/// Names of entries in `dir`, in directory-listing order.
///
/// A missing directory yields an empty list.
pub async fn list_dir(dir: &Path) -> Result<Vec<String>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).fs_context("listing directory", dir),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("listing directory", dir)?
    {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Replaces `path` with `contents`, creating parent directories as needed.
///
/// The new file gets mode 0644 on Unix.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating output directory", parent)?;
    }

    let staging = staging_path(path);
    let written = async {
        let mut file = fs::File::create(&staging).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        set_mode_0644(&staging).await
    }
    .await;

    if let Err(e) = written {
        let _ = fs::remove_file(&staging).await;
        return Err(e).fs_context("writing", &staging);
    }

    if let Err(e) = fs::rename(&staging, path).await {
        let _ = fs::remove_file(&staging).await;
        return Err(e).fs_context("replacing", path);
    }
    Ok(())
}

/// Streams `from` into `to`, replacing `to`.
///
/// The bytes go to a staging sibling that is flushed, synced and renamed over
/// `to`, so `to` only ever holds a complete copy. Returns bytes copied.
pub async fn stream_copy(from: &Path, to: &Path) -> Result<u64> {
    let source = fs::File::open(from)
        .await
        .fs_context("opening copy source", from)?;
    let staging = unique_staging_path(to);
    let target = fs::File::create(&staging)
        .await
        .fs_context("creating copy target", &staging)?;

    let copied = async {
        let mut reader = BufReader::new(source);
        let mut writer = BufWriter::new(target);
        let copied = tokio::io::copy(&mut reader, &mut writer).await?;
        writer.flush().await?;
        writer.into_inner().sync_all().await?;
        Ok::<_, io::Error>(copied)
    }
    .await;

    let copied = match copied {
        Ok(copied) => copied,
        Err(e) => {
            let _ = fs::remove_file(&staging).await;
            return Err(e).fs_context("copying into", to);
        }
    };

    if let Err(e) = fs::rename(&staging, to).await {
        let _ = fs::remove_file(&staging).await;
        return Err(e).fs_context("replacing", to);
    }
    Ok(copied)
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

/// Staging name distinct per call, for copies that may run concurrently.
fn unique_staging_path(path: &Path) -> PathBuf {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let seq = NEXT.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{name}.{}.{seq}.tmp", std::process::id()))
}

#[cfg(unix)]
async fn set_mode_0644(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o644)).await
}

#[cfg(not(unix))]
async fn set_mode_0644(_path: &Path) -> io::Result<()> {
    Ok(())
}
