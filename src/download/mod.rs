//! Remote resources: HTTP downloads and zip extraction.
//!
//! - [`http`] - [`Downloader`] trait and the reqwest-backed implementation
//! - [`archive`] - zip extraction preserving paths and mode bits

pub mod archive;
pub mod http;

pub use archive::extract_zip;
pub use http::{Downloader, HttpDownloader};

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Download a zip archive and unpack it at `dest`.
///
/// The archive is extracted into a staging directory and moved into place
/// only after every entry was written, so a failed download or extraction
/// leaves nothing at `dest` or its missing parents. An archive that wraps
/// everything in one top-level directory has that directory become `dest`.
/// An existing `dest` is replaced.
///
/// Returns the number of files written.
pub fn download_and_extract(
    downloader: &dyn Downloader,
    url: &str,
    dest: &Path,
) -> Result<usize> {
    let file = downloader.fetch(url)?;

    let staging = tempfile::Builder::new()
        .prefix(".bob-extract")
        .tempdir_in(existing_ancestor(dest))?;
    let unpacked = staging.path().join("unpacked");
    let written = extract_zip(file, &unpacked)?;

    let source = single_top_level_dir(&unpacked)?.unwrap_or(unpacked);
    if dest.exists() {
        fs::remove_dir_all(dest)?;
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::rename(&source, dest)?;

    tracing::debug!("Installed {} file(s) at {}", written, dest.display());
    Ok(written)
}

/// Closest ancestor of `path` that already exists.
fn existing_ancestor(path: &Path) -> &Path {
    path.ancestors()
        .skip(1)
        .find(|p| p.is_dir())
        .unwrap_or_else(|| Path::new("."))
}

/// The only entry of `dir`, when that entry is a directory.
fn single_top_level_dir(dir: &Path) -> Result<Option<PathBuf>> {
    let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    if entries.len() != 1 {
        return Ok(None);
    }
    let entry = entries.remove(0);
    Ok(entry.file_type()?.is_dir().then(|| entry.path()))
}
