//! Framework source download and extraction
//!
//! Downloads the framework's source zip and unpacks it as
//! `download-<version>` under the download directory. An existing
//! `download-<version>` makes the whole operation a logged no-op, so a build
//! never re-downloads sources it already has. No retries beyond what the
//! HTTP client itself does; a failed download aborts the build.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{KilnError, Result};
use crate::fsutil;
use crate::progress::ProgressReporter;

/// Download and unpack the framework sources, idempotently.
///
/// Returns the path of the unpacked source tree.
pub fn fetch_library(
    url: &str,
    dest: &Path,
    version: &str,
    reporter: &dyn ProgressReporter,
) -> Result<PathBuf> {
    let download_dir = dest.join(format!("download-{version}"));
    if download_dir.exists() {
        reporter.note(&format!(
            "directory {} already exists, skipping download",
            download_dir.display()
        ));
        return Ok(download_dir);
    }

    reporter.start_step(&format!("download framework sources {version}"));
    let bytes = download(url)?;
    reporter.finish_step(&format!("download framework sources {version}"));

    reporter.start_step("unpack framework sources");
    unpack_archive(&bytes, &download_dir)?;
    reporter.finish_step("unpack framework sources");

    Ok(download_dir)
}

fn download(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url).map_err(|e| KilnError::DownloadFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !response.status().is_success() {
        return Err(KilnError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP status {}", response.status()),
        });
    }

    let bytes = response.bytes().map_err(|e| KilnError::DownloadFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(bytes.to_vec())
}

/// Unpack a zip archive so its contents land at `download_dir`.
///
/// Source archives usually wrap everything in a single versioned top-level
/// directory; that directory becomes `download_dir` directly. Archives
/// without the wrapper directory are unpacked into `download_dir` as-is.
pub fn unpack_archive(bytes: &[u8], download_dir: &Path) -> Result<()> {
    let parent = download_dir.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;
    let staging = tempfile::tempdir_in(parent)?;

    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| KilnError::ArchiveInvalid {
            path: download_dir.display().to_string(),
            reason: e.to_string(),
        })?;
    archive
        .extract(staging.path())
        .map_err(|e| KilnError::ArchiveInvalid {
            path: download_dir.display().to_string(),
            reason: e.to_string(),
        })?;

    let mut entries: Vec<PathBuf> = fs::read_dir(staging.path())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    match entries.as_slice() {
        [single] if single.is_dir() => fsutil::rename(single, download_dir)?,
        _ => {
            fs::create_dir_all(download_dir)?;
            for entry in entries {
                let Some(name) = entry.file_name() else {
                    continue;
                };
                fsutil::rename(&entry, &download_dir.join(name))?;
            }
        }
    }

    Ok(())
}
