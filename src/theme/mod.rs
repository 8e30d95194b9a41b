//! Theme processing (build steps 7 to 9)
//!
//! Step 7 copies every theme package's sources into the target tree,
//! rewriting paths that nest a module-source segment. Step 8 compiles each
//! `library.source.less` into `library.css`, `library-RTL.css` and
//! `library-parameters.json`, healing missing partials by creating empty
//! placeholders and retrying; unrecoverable compile failures skip that theme
//! with a warning and never abort the build. Step 9 minifies all emitted CSS.

pub mod compiler;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::context::BuildContext;
use crate::error::Result;
use crate::fsutil;
use crate::library::discovery::{ModuleDescriptor, ThemeDescriptor};
use crate::library::scripts::THEME_SOURCE_NAME;
use crate::minify;
use crate::template;
use compiler::{LessCompiler, LessFailure};

/// Upper bound on healing attempts for one stylesheet
const MAX_HEAL_ATTEMPTS: usize = 16;

/// Step 7: copy theme package sources into the target tree
pub fn copy_themes(
    ctx: &BuildContext<'_>,
    themes: &[ThemeDescriptor],
    modules: &[ModuleDescriptor],
) -> Result<usize> {
    let mut copied = 0;
    for theme in themes {
        let base = theme.source.join("src");
        let mut files: Vec<PathBuf> = WalkDir::new(&base)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path().to_path_buf())
            .collect();
        files.sort();

        for path in files {
            let Ok(relative) = path.strip_prefix(&base) else {
                continue;
            };
            let relocated = relocate_module_segment(relative, modules);
            let target = ctx.target.join(relocated);

            if path.file_name().and_then(|n| n.to_str()) == Some(THEME_SOURCE_NAME) {
                let content = fsutil::read_to_string(&path)?;
                fsutil::write(&target, template::apply_banner(&content, &ctx.banner))?;
            } else {
                fsutil::copy(&path, &target)?;
            }
            copied += 1;
        }
    }
    Ok(copied)
}

/// Rewrite a dotted module-name path component followed by a `src` component
/// to the module's namespace directories, e.g. `sap.ui.core/src/themes/…` to
/// `sap/ui/core/themes/…`.
fn relocate_module_segment(relative: &Path, modules: &[ModuleDescriptor]) -> PathBuf {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| c.as_os_str().to_str().map(str::to_string))
        .collect();

    let mut out = PathBuf::new();
    let mut index = 0;
    while index < parts.len() {
        let part = &parts[index];
        let is_module_segment = index + 1 < parts.len()
            && parts[index + 1] == "src"
            && modules.iter().any(|module| module.name == *part);
        if is_module_segment {
            for namespace_part in part.split('.') {
                out.push(namespace_part);
            }
            index += 2;
        } else {
            out.push(part);
            index += 1;
        }
    }
    out
}

/// Outcome counts of the theme compile step
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ThemeCompileReport {
    pub compiled: usize,
    pub skipped: usize,
}

/// Step 8: compile every theme stylesheet in the target tree
pub fn compile_themes(
    ctx: &BuildContext<'_>,
    less_compiler: &dyn LessCompiler,
) -> Result<ThemeCompileReport> {
    let entries = theme_entries(&ctx.target);
    let unavailable_warned = AtomicBool::new(false);

    let outcomes: Vec<bool> = entries
        .par_iter()
        .map(|entry| compile_one(ctx, less_compiler, entry, &unavailable_warned))
        .collect::<Result<Vec<bool>>>()?;

    let compiled = outcomes.iter().filter(|ok| **ok).count();
    Ok(ThemeCompileReport {
        compiled,
        skipped: outcomes.len() - compiled,
    })
}

/// Every `library.source.less` under a `themes/` directory, sorted
fn theme_entries(target: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = WalkDir::new(target)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| {
            path.file_name().and_then(|n| n.to_str()) == Some(THEME_SOURCE_NAME)
                && path
                    .components()
                    .any(|c| c.as_os_str().to_str() == Some("themes"))
        })
        .collect();
    entries.sort();
    entries
}

/// Compile one stylesheet with the bounded missing-partial healing loop.
///
/// Returns `Ok(true)` when CSS was emitted, `Ok(false)` when the theme was
/// skipped. Only placeholder write failures that also abort the heal are
/// reported as skips; filesystem errors while writing the compiled outputs
/// stay fatal.
fn compile_one(
    ctx: &BuildContext<'_>,
    less_compiler: &dyn LessCompiler,
    entry: &Path,
    unavailable_warned: &AtomicBool,
) -> Result<bool> {
    let dest_dir = entry.parent().unwrap_or_else(|| Path::new("."));
    let mut created: HashSet<PathBuf> = HashSet::new();

    for _ in 0..MAX_HEAL_ATTEMPTS {
        match less_compiler.compile(entry) {
            Ok(output) => {
                fsutil::write(&dest_dir.join("library.css"), &output.css)?;
                fsutil::write(&dest_dir.join("library-RTL.css"), &output.css_rtl)?;
                let parameters = serde_json::to_string_pretty(&output.parameters)?;
                fsutil::write(&dest_dir.join("library-parameters.json"), parameters)?;
                return Ok(true);
            }
            Err(LessFailure::MissingImport { file }) => {
                let placeholder = dest_dir.join(&file);
                if created.contains(&placeholder) {
                    ctx.reporter.warn(&format!(
                        "created placeholder did not resolve '{file}', skipping {}",
                        entry.display()
                    ));
                    return Ok(false);
                }
                if placeholder.exists() {
                    ctx.reporter.warn(&format!(
                        "import '{file}' exists but compilation keeps failing, skipping {}",
                        entry.display()
                    ));
                    return Ok(false);
                }
                if fsutil::write(&placeholder, "").is_err() {
                    ctx.reporter.warn(&format!(
                        "could not create placeholder '{file}', skipping {}",
                        entry.display()
                    ));
                    return Ok(false);
                }
                created.insert(placeholder);
            }
            Err(LessFailure::Unavailable(reason)) => {
                if !unavailable_warned.swap(true, Ordering::Relaxed) {
                    ctx.reporter
                        .warn(&format!("theme compilation skipped: {reason}"));
                }
                return Ok(false);
            }
            Err(LessFailure::Failed(message)) => {
                ctx.reporter
                    .warn(&format!("failed to compile {}: {message}", entry.display()));
                return Ok(false);
            }
        }
    }

    ctx.reporter.warn(&format!(
        "giving up on {} after {MAX_HEAL_ATTEMPTS} healing attempts",
        entry.display()
    ));
    Ok(false)
}

/// Step 9: minify every emitted CSS file in place
pub fn minify_all_css(ctx: &BuildContext<'_>) -> Result<usize> {
    let mut stylesheets: Vec<PathBuf> = WalkDir::new(&ctx.target)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("css"))
        .collect();
    stylesheets.sort();

    stylesheets
        .par_iter()
        .map(|path| {
            let content = fsutil::read_to_string(path)?;
            fsutil::write(path, minify::minify_css(&content))
        })
        .collect::<Result<Vec<()>>>()?;

    Ok(stylesheets.len())
}
