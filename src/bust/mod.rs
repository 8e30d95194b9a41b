//! Content-addressed cache busting of an application HTML entry point
//!
//! Every resource root named in the HTML mapping points at an application
//! bundle directory. The bundle's preload artifact plus any resources
//! declared in its manifest are hashed; the directory is renamed to the
//! short digest and the mapping entry rewritten to match. Browsers then
//! fetch a fresh copy only when content actually changed.

pub mod resource_roots;

use std::path::Path;

use serde_json::Value;

use crate::error::{KilnError, Result};
use crate::fsutil;
use crate::hash;
use crate::progress::ProgressReporter;

/// Preload artifact hashed for every application bundle
pub const PRELOAD_ARTIFACT: &str = "Component-preload.js";

/// Application manifest declaring additional hashed resources
pub const APP_MANIFEST: &str = "manifest.json";

/// Manifest section holding the resource declarations
const FRAMEWORK_SECTION: &str = "sap.ui5";

/// Cache-bust the HTML entry point in place
pub fn bust_entry_point(html_path: &Path, reporter: &dyn ProgressReporter) -> Result<()> {
    let html = fsutil::read_to_string(html_path)?;
    let rewritten = bust_html(&html, html_path, reporter)?;
    fsutil::write(html_path, rewritten)?;
    reporter.note(&format!("cache busted {}", html_path.display()));
    Ok(())
}

/// Rewrite the resource-root mapping of an HTML document, renaming bundle
/// directories on disk to their content hashes.
///
/// Entries without any hashable content (no preload artifact, no
/// manifest-declared resources) keep their original path. A failed rename is
/// fatal and earlier renames are not rolled back.
pub fn bust_html(
    html: &str,
    html_path: &Path,
    reporter: &dyn ProgressReporter,
) -> Result<String> {
    let origin = html_path.display().to_string();
    let html_dir = html_path.parent().unwrap_or_else(|| Path::new("."));
    let (mut mapping, range) = resource_roots::extract_mapping(html, &origin)?;

    for (name, value) in mapping.iter_mut() {
        let app_path = value
            .as_str()
            .ok_or_else(|| KilnError::ResourceRootsMalformed {
                path: origin.clone(),
                reason: format!("entry '{name}' is not a string"),
            })?;
        let app_dir = html_dir.join(app_path);

        let chunks = collect_hash_sources(&app_dir)?;
        if chunks.is_empty() {
            reporter.note(&format!("{name}: no hashable content, path kept"));
            continue;
        }

        let digest = hash::short_digest(chunks.iter().map(Vec::as_slice));
        let hashed_dir = match app_dir.parent() {
            Some(parent) => parent.join(&digest),
            None => Path::new(&digest).to_path_buf(),
        };
        fsutil::rename(&app_dir, &hashed_dir)?;

        reporter.note(&format!("{name}: {app_path} -> {digest}"));
        *value = Value::String(digest);
    }

    let json = serde_json::to_string(&mapping)?;
    Ok(resource_roots::substitute(html, range, &json))
}

/// Collect the byte contents contributing to a bundle's hash.
///
/// Manifest-declared resources come first in declaration order, the preload
/// artifact is appended. A missing manifest or preload artifact is
/// tolerated; a missing declared resource is a fatal read error.
fn collect_hash_sources(app_dir: &Path) -> Result<Vec<Vec<u8>>> {
    let mut chunks = Vec::new();

    let manifest_path = app_dir.join(APP_MANIFEST);
    if manifest_path.is_file() {
        let manifest: Value = serde_json::from_str(&fsutil::read_to_string(&manifest_path)?)
            .map_err(|e| KilnError::ConfigParseFailed {
                path: manifest_path.display().to_string(),
                reason: e.to_string(),
            })?;
        let declared = manifest
            .get(FRAMEWORK_SECTION)
            .and_then(|section| section.get("resources"))
            .and_then(Value::as_object);
        if let Some(resources) = declared {
            for list in resources.values() {
                let Some(items) = list.as_array() else {
                    continue;
                };
                for item in items {
                    if let Some(uri) = item.get("uri").and_then(Value::as_str) {
                        chunks.push(fsutil::read_bytes(&app_dir.join(uri))?);
                    }
                }
            }
        }
    }

    let preload_path = app_dir.join(PRELOAD_ARTIFACT);
    if preload_path.is_file() {
        chunks.push(fsutil::read_bytes(&preload_path)?);
    }

    Ok(chunks)
}
