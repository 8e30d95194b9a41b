//! Script and resource emission (build steps 2 and 3)
//!
//! Step 2 writes a `-dbg.js` debug copy of every module script, unminified,
//! with the copyright banner substituted. Step 3 copies everything else:
//! license and readme files from the source root plus all module resources,
//! minifying scripts and banner-substituting theme stylesheet sources on the
//! way.

use std::path::Path;

use walkdir::WalkDir;

use crate::context::BuildContext;
use crate::error::Result;
use crate::fsutil;
use crate::library::discovery::ModuleDescriptor;
use crate::minify;
use crate::template;

/// Theme stylesheet entry filename carrying the banner token
pub const THEME_SOURCE_NAME: &str = "library.source.less";

/// Top-level documentation files copied verbatim from the source root
const ROOT_RESOURCES: &[&str] = &["LICENSE.txt", "NOTICE.txt", "README.md"];

/// Step 2: emit unminified debug copies of every module script
pub fn emit_debug_resources(ctx: &BuildContext<'_>, modules: &[ModuleDescriptor]) -> Result<usize> {
    let mut emitted = 0;
    for module in modules {
        for (path, relative) in module_files(module) {
            if path.extension().and_then(|e| e.to_str()) != Some("js") {
                continue;
            }
            let debug_relative = debug_name(&relative);
            let content = fsutil::read_to_string(&path)?;
            fsutil::write(
                &ctx.target.join(debug_relative),
                template::apply_banner(&content, &ctx.banner),
            )?;
            emitted += 1;
        }
    }
    Ok(emitted)
}

/// Step 3: copy remaining resources, minifying scripts
pub fn copy_resources(ctx: &BuildContext<'_>, modules: &[ModuleDescriptor]) -> Result<usize> {
    let mut copied = 0;

    for name in ROOT_RESOURCES {
        let source = ctx.source.join(name);
        if source.is_file() {
            fsutil::copy(&source, &ctx.target.join(name))?;
            copied += 1;
        }
    }

    for module in modules {
        for (path, relative) in module_files(module) {
            let target = ctx.target.join(&relative);
            match path.extension().and_then(|e| e.to_str()) {
                Some("js") => {
                    let content = fsutil::read_to_string(&path)?;
                    fsutil::write(&target, minify::minify_js(&content))?;
                }
                _ if path.file_name().and_then(|n| n.to_str()) == Some(THEME_SOURCE_NAME) => {
                    let content = fsutil::read_to_string(&path)?;
                    fsutil::write(&target, template::apply_banner(&content, &ctx.banner))?;
                }
                _ => fsutil::copy(&path, &target)?,
            }
            copied += 1;
        }
    }

    Ok(copied)
}

/// Map `file.js` to `file-dbg.js`, leaving the directory part alone
pub fn debug_name(relative: &str) -> String {
    match relative.strip_suffix(".js") {
        Some(stem) => format!("{stem}-dbg.js"),
        None => relative.to_string(),
    }
}

/// All files under a module's `src/` directory with their target-relative
/// paths, in sorted order.
///
/// Module sources flatten into the shared target root: each module's `src/`
/// already carries its namespace directories.
fn module_files(module: &ModuleDescriptor) -> Vec<(std::path::PathBuf, String)> {
    let base = module.source.join("src");
    let mut files: Vec<_> = WalkDir::new(&base)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = relative_to(entry.path(), &base)?;
            Some((entry.path().to_path_buf(), relative))
        })
        .collect();
    files.sort();
    files
}

fn relative_to(path: &Path, base: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConventions;
    use crate::progress::SilentReporter;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn module(source: PathBuf, target: &Path) -> ModuleDescriptor {
        ModuleDescriptor {
            name: "sap.m".to_string(),
            target: target.join("sap/m"),
            source,
        }
    }

    fn context<'a>(
        temp: &TempDir,
        reporter: &'a SilentReporter,
    ) -> crate::context::BuildContext<'a> {
        crate::context::BuildContext::new(
            temp.path().join("lib"),
            temp.path().join("dist"),
            "1.0.0".to_string(),
            BuildConventions::default(),
            reporter,
        )
    }

    #[test]
    fn test_debug_name() {
        assert_eq!(debug_name("sap/m/Button.js"), "sap/m/Button-dbg.js");
        assert_eq!(debug_name("sap/m/themes/base/x.less"), "sap/m/themes/base/x.less");
    }

    #[test]
    fn test_debug_copies_keep_content_and_substitute_banner() {
        let temp = TempDir::new().unwrap();
        let reporter = SilentReporter;
        let ctx = context(&temp, &reporter);

        let module_src = temp.path().join("lib/src/sap.m");
        fs::create_dir_all(module_src.join("src/sap/m")).unwrap();
        fs::write(
            module_src.join("src/sap/m/Button.js"),
            "/* ${copyright} */\nvar Button = 1;\n",
        )
        .unwrap();

        let modules = vec![module(module_src, &ctx.target)];
        let emitted = emit_debug_resources(&ctx, &modules).unwrap();
        assert_eq!(emitted, 1);

        let debug = fs::read_to_string(ctx.target.join("sap/m/Button-dbg.js")).unwrap();
        assert!(debug.contains("var Button = 1;"));
        assert!(debug.contains(&ctx.banner));
        assert!(!debug.contains("${copyright}"));
    }

    #[test]
    fn test_copy_resources_minifies_scripts() {
        let temp = TempDir::new().unwrap();
        let reporter = SilentReporter;
        let ctx = context(&temp, &reporter);

        let module_src = temp.path().join("lib/src/sap.m");
        fs::create_dir_all(module_src.join("src/sap/m")).unwrap();
        fs::write(
            module_src.join("src/sap/m/Button.js"),
            "// comment\nvar Button = 1;\n",
        )
        .unwrap();
        fs::write(module_src.join("src/sap/m/messagebundle.properties"), "KEY=Value\n").unwrap();

        let modules = vec![module(module_src, &ctx.target)];
        copy_resources(&ctx, &modules).unwrap();

        let minified = fs::read_to_string(ctx.target.join("sap/m/Button.js")).unwrap();
        assert_eq!(minified, "var Button = 1;");
        let properties =
            fs::read_to_string(ctx.target.join("sap/m/messagebundle.properties")).unwrap();
        assert_eq!(properties, "KEY=Value\n");
    }

    #[test]
    fn test_copy_resources_banners_theme_sources_and_root_files() {
        let temp = TempDir::new().unwrap();
        let reporter = SilentReporter;
        let ctx = context(&temp, &reporter);

        fs::create_dir_all(ctx.source.clone()).unwrap();
        fs::write(ctx.source.join("LICENSE.txt"), "license text").unwrap();

        let module_src = temp.path().join("lib/src/sap.m");
        let themes = module_src.join("src/sap/m/themes/base");
        fs::create_dir_all(&themes).unwrap();
        fs::write(
            themes.join(THEME_SOURCE_NAME),
            "/* ${copyright} */\n@import \"global.less\";\n",
        )
        .unwrap();

        let modules = vec![module(module_src, &ctx.target)];
        copy_resources(&ctx, &modules).unwrap();

        assert_eq!(
            fs::read_to_string(ctx.target.join("LICENSE.txt")).unwrap(),
            "license text"
        );
        let less =
            fs::read_to_string(ctx.target.join("sap/m/themes/base").join(THEME_SOURCE_NAME))
                .unwrap();
        assert!(less.contains(&ctx.banner));
    }
}
