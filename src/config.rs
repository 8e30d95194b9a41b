//! Project configuration (`uikiln.yaml`)
//!
//! The config file is optional; every field has a default or is supplied by a
//! command-line flag. Flags always win over the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KilnError, Result};

/// Project config filename
pub const CONFIG_FILE: &str = "uikiln.yaml";

/// Top-level project configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Library source parameters (version, download URL, paths)
    #[serde(default)]
    pub library: LibraryConfig,

    /// Build conventions of the framework source tree
    #[serde(default)]
    pub build: BuildConventions,
}

/// Where the framework sources come from and where the build lands
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Framework version label, embedded in banner and manifest
    pub version: Option<String>,

    /// Download URL for the framework source archive
    pub url: Option<String>,

    /// Directory the source archive is unpacked into
    pub download_dir: Option<PathBuf>,

    /// Root of the unpacked framework sources
    pub source: Option<PathBuf>,

    /// Target directory for the built distribution
    pub target: Option<PathBuf>,
}

/// Naming conventions of the framework source tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BuildConventions {
    /// Module directories start with this prefix (e.g. `sap.m`, `sap.ui.core`)
    pub module_prefix: String,

    /// Theme package directories start with this prefix
    pub theme_prefix: String,

    /// The core module with special preload collection rules
    pub core_module: String,

    /// Core entry files composed from `raw:` inclusion directives.
    /// The first entry is the primary one whose inclusions are excluded from
    /// later preload bundling; `-dbg` variants resolve debug counterparts.
    pub core_entries: Vec<String>,

    /// Target-relative glob patterns scanned for the core preload bundle
    pub core_scan: Vec<String>,

    /// Distribution name written into the version manifest
    pub distribution: String,
}

impl Default for BuildConventions {
    fn default() -> Self {
        Self {
            module_prefix: "sap.".to_string(),
            theme_prefix: "themelib".to_string(),
            core_module: "sap.ui.core".to_string(),
            core_entries: vec![
                "sap-ui-core.js".to_string(),
                "sap-ui-core-nojQuery.js".to_string(),
                "sap-ui-core-dbg.js".to_string(),
                "sap-ui-core-nojQuery-dbg.js".to_string(),
            ],
            core_scan: vec![
                "jquery.sap.*.js".to_string(),
                "sap/ui/Global.js".to_string(),
                "sap/ui/base/**/*.js".to_string(),
                "sap/ui/core/**/*.js".to_string(),
                "sap/ui/model/**/*.js".to_string(),
            ],
            distribution: "uikiln-custom-dist".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration from a project directory.
    ///
    /// Returns the defaults if `uikiln.yaml` does not exist; the file is
    /// optional.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| KilnError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| KilnError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Resolve a required parameter from flag or config, flag first
pub fn require<T: Clone>(flag: Option<T>, config: Option<T>, name: &str) -> Result<T> {
    flag.or(config).ok_or_else(|| KilnError::MissingParameter {
        name: name.to_string(),
    })
}
