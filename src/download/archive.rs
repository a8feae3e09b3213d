//! Zip archive extraction.

use crate::error::{BobError, Result};
use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

fn archive_error(e: zip::result::ZipError) -> BobError {
    BobError::Archive {
        message: e.to_string(),
    }
}

/// Extract every entry of a zip archive under `dest`.
///
/// The extracted tree mirrors the archive's paths. On Unix, file mode bits
/// stored in the archive are applied to the extracted files. Entries whose
/// names would land outside `dest` are rejected.
///
/// Returns the number of files written.
pub fn extract_zip<R: Read + Seek>(reader: R, dest: &Path) -> Result<usize> {
    let mut archive = ZipArchive::new(reader).map_err(archive_error)?;
    fs::create_dir_all(dest)?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(archive_error)?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(BobError::Archive {
                message: format!("entry '{}' escapes the destination", entry.name()),
            });
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&out_path)?;
        io::copy(&mut entry, &mut out)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode & 0o7777))?;
        }

        written += 1;
    }

    tracing::debug!("Extracted {} file(s) into {}", written, dest.display());
    Ok(written)
}
