//! Module and theme discovery in the framework source tree
//!
//! Modules and themes are top-level directories under `src/`, told apart by
//! their name prefix. Directory listing order is not stable across
//! filesystems, so results are sorted by name before use; the version
//! manifest and every later step depend on that.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::BuildConventions;
use crate::error::{KilnError, Result};

/// A discovered framework module, immutable for the rest of the build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Dotted module name, e.g. `sap.ui.core`
    pub name: String,
    /// Module source directory under `src/`
    pub source: PathBuf,
    /// Module target directory, dots mapped to path segments
    pub target: PathBuf,
}

/// A discovered theme package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDescriptor {
    pub name: String,
    pub source: PathBuf,
}

/// Outcome of step 1 of the library build
#[derive(Debug, Default)]
pub struct Discovery {
    pub modules: Vec<ModuleDescriptor>,
    pub themes: Vec<ThemeDescriptor>,
}

/// Resolve the directory that contains the `src/` subdirectory.
///
/// Looks at the source root first, then one level deep (sorted, first match
/// wins). Fails with a descriptive error if no `src/` exists at either level.
pub fn resolve_source_root(source: &Path) -> Result<PathBuf> {
    if source.join("src").is_dir() {
        return Ok(source.to_path_buf());
    }

    let mut children: Vec<PathBuf> = fs::read_dir(source)
        .map_err(|e| KilnError::FileReadFailed {
            path: source.display().to_string(),
            reason: e.to_string(),
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    children.sort();

    children
        .into_iter()
        .find(|child| child.join("src").is_dir())
        .ok_or_else(|| KilnError::SourceTreeInvalid {
            path: source.display().to_string(),
        })
}

/// Enumerate module and theme directories by prefix convention.
///
/// Every module's target path is derived deterministically from its name;
/// names are unique within one directory listing, so target paths are too.
pub fn discover(
    source_root: &Path,
    target_root: &Path,
    conventions: &BuildConventions,
) -> Result<Discovery> {
    let src_dir = source_root.join("src");
    let mut names: Vec<String> = fs::read_dir(&src_dir)
        .map_err(|e| KilnError::FileReadFailed {
            path: src_dir.display().to_string(),
            reason: e.to_string(),
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();

    let mut discovery = Discovery::default();
    for name in names {
        if name.starts_with(&conventions.module_prefix) {
            let target = name
                .split('.')
                .fold(target_root.to_path_buf(), |path, part| path.join(part));
            discovery.modules.push(ModuleDescriptor {
                source: src_dir.join(&name),
                target,
                name,
            });
        } else if name.starts_with(&conventions.theme_prefix) {
            discovery.themes.push(ThemeDescriptor {
                source: src_dir.join(&name),
                name,
            });
        }
    }

    Ok(discovery)
}

impl ModuleDescriptor {
    /// The module's namespace as a relative path, e.g. `sap/ui/core`
    pub fn namespace_path(&self) -> PathBuf {
        self.name.split('.').collect()
    }
}
