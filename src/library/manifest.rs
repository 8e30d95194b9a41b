//! Version manifest (build step 10)
//!
//! Enumerates every discovered module with the build timestamp and version;
//! written once at the end of the build and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::context::BuildContext;
use crate::error::Result;
use crate::fsutil;
use crate::library::discovery::ModuleDescriptor;

/// Filename of the version manifest in the target root
pub const MANIFEST_FILE: &str = "sap-ui-version.json";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionManifest {
    #[serde(rename = "buildTimestamp")]
    pub build_timestamp: String,
    pub name: String,
    pub version: String,
    pub libraries: Vec<LibraryVersion>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibraryVersion {
    #[serde(rename = "buildTimestamp")]
    pub build_timestamp: String,
    pub name: String,
    pub version: String,
}

/// Compose and write the version manifest for the discovered modules
pub fn write_manifest(ctx: &BuildContext<'_>, modules: &[ModuleDescriptor]) -> Result<()> {
    let manifest = VersionManifest {
        build_timestamp: ctx.build_time.clone(),
        name: ctx.conventions.distribution.clone(),
        version: ctx.version.clone(),
        libraries: modules
            .iter()
            .map(|module| LibraryVersion {
                build_timestamp: ctx.build_time.clone(),
                name: module.name.clone(),
                version: ctx.version.clone(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&manifest)?;
    fsutil::write(&ctx.target.join(MANIFEST_FILE), json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConventions;
    use crate::progress::SilentReporter;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn module(name: &str) -> ModuleDescriptor {
        ModuleDescriptor {
            name: name.to_string(),
            source: PathBuf::from("/src").join(name),
            target: PathBuf::from("/dist").join(name.replace('.', "/")),
        }
    }

    #[test]
    fn test_manifest_lists_modules_in_discovery_order() {
        let temp = TempDir::new().unwrap();
        let reporter = SilentReporter;
        let ctx = BuildContext::new(
            temp.path().join("lib"),
            temp.path().join("dist"),
            "1.52.5".to_string(),
            BuildConventions::default(),
            &reporter,
        );

        let modules = vec![module("sap.f"), module("sap.m"), module("sap.ui.core")];
        write_manifest(&ctx, &modules).unwrap();

        let written = std::fs::read_to_string(ctx.target.join(MANIFEST_FILE)).unwrap();
        let parsed: VersionManifest = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.version, "1.52.5");
        assert_eq!(parsed.name, ctx.conventions.distribution);
        let names: Vec<_> = parsed.libraries.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["sap.f", "sap.m", "sap.ui.core"]);
        assert!(parsed.libraries.iter().all(|l| l.version == "1.52.5"));
    }

    #[test]
    fn test_manifest_uses_camel_case_timestamp_key() {
        let temp = TempDir::new().unwrap();
        let reporter = SilentReporter;
        let ctx = BuildContext::new(
            temp.path().join("lib"),
            temp.path().join("dist"),
            "1.0.0".to_string(),
            BuildConventions::default(),
            &reporter,
        );

        write_manifest(&ctx, &[]).unwrap();
        let written = std::fs::read_to_string(ctx.target.join(MANIFEST_FILE)).unwrap();
        assert!(written.contains("\"buildTimestamp\""));
    }
}
