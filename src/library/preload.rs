//! Preload bundle generation (build steps 5 and 6)
//!
//! A preload bundle packs all of a module's scripts into one
//! loader-registration artifact so the runtime fetches a single file instead
//! of dozens. Debug copies, existing preload artifacts and scripts already
//! inlined into the composed core entry are excluded. Modules are bundled as
//! an independent batch; the core module is bundled separately from a fixed
//! set of scan patterns because its resources span the target root.

use std::path::Path;

use rayon::prelude::*;
use serde_json::{Map, Value, json};
use walkdir::WalkDir;
use wax::{Glob, Pattern};

use crate::context::BuildContext;
use crate::error::{KilnError, Result};
use crate::fsutil;
use crate::library::discovery::ModuleDescriptor;

/// Filename of the emitted preload artifact
pub const PRELOAD_FILE: &str = "library-preload.js";

/// Step 5: preload bundles for every module except the core module
pub fn build_module_preloads(
    ctx: &BuildContext<'_>,
    modules: &[ModuleDescriptor],
    inlined: &[String],
) -> Result<usize> {
    let bundled: Vec<()> = modules
        .par_iter()
        .filter(|module| module.name != ctx.conventions.core_module)
        .map(|module| {
            let scripts = collect_module_scripts(ctx, &module.target, inlined);
            write_preload(ctx, &module.target, &module.name.replace('.', "/"), scripts)
        })
        .collect::<Result<Vec<()>>>()?;
    Ok(bundled.len())
}

/// Step 6: the core module's preload bundle, collected from the configured
/// scan patterns instead of the module's own directory
pub fn build_core_preload(ctx: &BuildContext<'_>, inlined: &[String]) -> Result<()> {
    let globs = ctx
        .conventions
        .core_scan
        .iter()
        .map(|pattern| {
            Glob::new(pattern).map_err(|e| KilnError::InvalidGlob {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<Glob<'_>>>>()?;

    let mut scripts = Vec::new();
    for (path, relative) in target_scripts(&ctx.target) {
        if excluded(&relative, inlined) {
            continue;
        }
        if globs.iter().any(|glob| glob.is_match(relative.as_str())) {
            scripts.push((path, relative));
        }
    }

    let core_namespace = ctx.conventions.core_module.replace('.', "/");
    let core_target = ctx.target.join(&core_namespace);
    write_preload(ctx, &core_target, &core_namespace, scripts)
}

/// Non-debug, non-preload scripts under a module's target directory
fn collect_module_scripts(
    ctx: &BuildContext<'_>,
    module_target: &Path,
    inlined: &[String],
) -> Vec<(std::path::PathBuf, String)> {
    target_scripts(&ctx.target)
        .into_iter()
        .filter(|(path, relative)| {
            path.starts_with(module_target) && !excluded(relative, inlined)
        })
        .collect()
}

fn excluded(relative: &str, inlined: &[String]) -> bool {
    relative.ends_with("-dbg.js")
        || relative.ends_with(PRELOAD_FILE)
        || inlined.iter().any(|path| path == relative)
}

/// All scripts under the target root with their target-relative paths, sorted
fn target_scripts(target: &Path) -> Vec<(std::path::PathBuf, String)> {
    let mut scripts: Vec<_> = WalkDir::new(target)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(target)
                .ok()?
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join("/");
            relative
                .ends_with(".js")
                .then(|| (entry.path().to_path_buf(), relative))
        })
        .collect();
    scripts.sort();
    scripts
}

/// Serialize scripts into the loader-registration artifact
fn write_preload(
    ctx: &BuildContext<'_>,
    out_dir: &Path,
    namespace: &str,
    scripts: Vec<(std::path::PathBuf, String)>,
) -> Result<()> {
    let mut modules = Map::new();
    for (path, relative) in scripts {
        let content = fsutil::read_to_string(&path)?;
        modules.insert(relative, Value::String(content));
    }

    let bundle = json!({
        "version": "2.0",
        "name": format!("{namespace}/library-preload"),
        "modules": modules,
    });
    let script = format!(
        "jQuery.sap.registerPreloadedModules({});",
        serde_json::to_string(&bundle)?
    );
    fsutil::write(&out_dir.join(PRELOAD_FILE), script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConventions;
    use crate::progress::SilentReporter;
    use std::fs;
    use tempfile::TempDir;

    fn context<'a>(temp: &TempDir, reporter: &'a SilentReporter) -> BuildContext<'a> {
        BuildContext::new(
            temp.path().join("lib"),
            temp.path().join("dist"),
            "1.0.0".to_string(),
            BuildConventions::default(),
            reporter,
        )
    }

    fn module(ctx: &BuildContext<'_>, name: &str) -> ModuleDescriptor {
        ModuleDescriptor {
            name: name.to_string(),
            source: ctx.source.join("src").join(name),
            target: name
                .split('.')
                .fold(ctx.target.clone(), |path, part| path.join(part)),
        }
    }

    #[test]
    fn test_module_preload_bundles_scripts() {
        let temp = TempDir::new().unwrap();
        let reporter = SilentReporter;
        let ctx = context(&temp, &reporter);

        fs::create_dir_all(ctx.target.join("sap/m")).unwrap();
        fs::write(ctx.target.join("sap/m/Button.js"), "button;").unwrap();
        fs::write(ctx.target.join("sap/m/Button-dbg.js"), "debug;").unwrap();
        fs::write(ctx.target.join("sap/m/library.js"), "library;").unwrap();

        let modules = vec![module(&ctx, "sap.m")];
        let bundled = build_module_preloads(&ctx, &modules, &[]).unwrap();
        assert_eq!(bundled, 1);

        let preload = fs::read_to_string(ctx.target.join("sap/m").join(PRELOAD_FILE)).unwrap();
        assert!(preload.starts_with("jQuery.sap.registerPreloadedModules("));
        assert!(preload.ends_with(");"));
        assert!(preload.contains("\"sap/m/Button.js\""));
        assert!(preload.contains("\"sap/m/library.js\""));
        assert!(!preload.contains("Button-dbg"));
        assert!(preload.contains("\"name\":\"sap/m/library-preload\""));
    }

    #[test]
    fn test_core_module_skipped_in_module_batch() {
        let temp = TempDir::new().unwrap();
        let reporter = SilentReporter;
        let ctx = context(&temp, &reporter);

        fs::create_dir_all(ctx.target.join("sap/ui/core")).unwrap();
        fs::write(ctx.target.join("sap/ui/core/Core.js"), "core;").unwrap();

        let modules = vec![module(&ctx, "sap.ui.core")];
        let bundled = build_module_preloads(&ctx, &modules, &[]).unwrap();
        assert_eq!(bundled, 0);
        assert!(!ctx.target.join("sap/ui/core").join(PRELOAD_FILE).exists());
    }

    #[test]
    fn test_inlined_scripts_excluded() {
        let temp = TempDir::new().unwrap();
        let reporter = SilentReporter;
        let ctx = context(&temp, &reporter);

        fs::create_dir_all(ctx.target.join("sap/m")).unwrap();
        fs::write(ctx.target.join("sap/m/Button.js"), "button;").unwrap();
        fs::write(ctx.target.join("sap/m/Inlined.js"), "inlined;").unwrap();

        let modules = vec![module(&ctx, "sap.m")];
        build_module_preloads(&ctx, &modules, &["sap/m/Inlined.js".to_string()]).unwrap();

        let preload = fs::read_to_string(ctx.target.join("sap/m").join(PRELOAD_FILE)).unwrap();
        assert!(preload.contains("Button.js"));
        assert!(!preload.contains("Inlined.js"));
    }

    #[test]
    fn test_core_preload_scans_fixed_namespaces() {
        let temp = TempDir::new().unwrap();
        let reporter = SilentReporter;
        let ctx = context(&temp, &reporter);

        fs::create_dir_all(ctx.target.join("sap/ui/core")).unwrap();
        fs::create_dir_all(ctx.target.join("sap/m")).unwrap();
        fs::write(ctx.target.join("jquery.sap.global.js"), "global;").unwrap();
        fs::write(ctx.target.join("sap/ui/core/Core.js"), "core;").unwrap();
        fs::write(ctx.target.join("sap/m/Button.js"), "button;").unwrap();

        build_core_preload(&ctx, &[]).unwrap();

        let preload =
            fs::read_to_string(ctx.target.join("sap/ui/core").join(PRELOAD_FILE)).unwrap();
        assert!(preload.contains("\"jquery.sap.global.js\""));
        assert!(preload.contains("\"sap/ui/core/Core.js\""));
        // outside the scanned namespaces
        assert!(!preload.contains("sap/m/Button.js"));
    }

    #[test]
    fn test_invalid_core_scan_pattern_fails() {
        let temp = TempDir::new().unwrap();
        let reporter = SilentReporter;
        let mut ctx = context(&temp, &reporter);
        ctx.conventions.core_scan = vec!["[invalid".to_string()];
        fs::create_dir_all(&ctx.target).unwrap();

        let result = build_core_preload(&ctx, &[]);
        assert!(matches!(result, Err(KilnError::InvalidGlob { .. })));
    }

    #[test]
    fn test_preload_key_order_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let reporter = SilentReporter;
        let ctx = context(&temp, &reporter);

        fs::create_dir_all(ctx.target.join("sap/m")).unwrap();
        fs::write(ctx.target.join("sap/m/Zebra.js"), "z;").unwrap();
        fs::write(ctx.target.join("sap/m/Alpha.js"), "a;").unwrap();

        let modules = vec![module(&ctx, "sap.m")];
        build_module_preloads(&ctx, &modules, &[]).unwrap();

        let preload = fs::read_to_string(ctx.target.join("sap/m").join(PRELOAD_FILE)).unwrap();
        let alpha = preload.find("Alpha.js").unwrap();
        let zebra = preload.find("Zebra.js").unwrap();
        assert!(alpha < zebra);
    }
}
