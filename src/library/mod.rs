//! Library builder
//!
//! Orchestrates the ten sequential build steps that turn an unpacked
//! framework source tree into a ready-to-serve distribution. Steps run
//! strictly in order; the per-module and per-theme work inside steps 5, 8
//! and 9 fans out as independent batches and is awaited as a unit.

pub mod core;
pub mod discovery;
pub mod manifest;
pub mod preload;
pub mod scripts;

use std::path::PathBuf;

use crate::context::BuildContext;
use crate::error::Result;
use crate::theme;
use crate::theme::ThemeCompileReport;
use crate::theme::compiler::LessCompiler;

/// Summary of one library build invocation
#[derive(Debug, Default)]
pub struct BuildReport {
    pub target: PathBuf,
    /// The target directory already existed; nothing was touched
    pub skipped_existing_target: bool,
    pub modules: usize,
    pub debug_scripts: usize,
    pub resources: usize,
    pub preload_bundles: usize,
    pub themes: ThemeCompileReport,
}

/// Build the framework distribution, or no-op if the target already exists.
///
/// A pre-existing target directory is not an error: rebuilding over a prior
/// build would silently corrupt it, so the call logs and reports the
/// existing path instead. Any filesystem error in steps 1 to 7, 9 or 10
/// aborts the build; per-theme compile failures in step 8 degrade to skips.
pub fn build_library(
    mut ctx: BuildContext<'_>,
    less_compiler: &dyn LessCompiler,
) -> Result<BuildReport> {
    if ctx.target.exists() {
        ctx.reporter.note(&format!(
            "target directory {} already exists; clean it to rebuild",
            ctx.target.display()
        ));
        return Ok(BuildReport {
            target: ctx.target.clone(),
            skipped_existing_target: true,
            ..BuildReport::default()
        });
    }

    ctx.source = discovery::resolve_source_root(&ctx.source)?;

    ctx.reporter.start_step("discover modules and themes");
    let discovered = discovery::discover(&ctx.source, &ctx.target, &ctx.conventions)?;
    ctx.reporter.finish_step("discover modules and themes");

    ctx.reporter.start_step("copy debug resources");
    let debug_scripts = scripts::emit_debug_resources(&ctx, &discovered.modules)?;
    ctx.reporter.finish_step("copy debug resources");

    ctx.reporter.start_step("copy minified scripts and resources");
    let resources = scripts::copy_resources(&ctx, &discovered.modules)?;
    ctx.reporter.finish_step("copy minified scripts and resources");

    ctx.reporter.start_step("compose core entries");
    let inlined = core::compose_core_entries(&ctx)?;
    ctx.reporter.finish_step("compose core entries");

    ctx.reporter.start_step("bundle module preloads");
    let preload_bundles = preload::build_module_preloads(&ctx, &discovered.modules, &inlined)?;
    ctx.reporter.finish_step("bundle module preloads");

    ctx.reporter.start_step("bundle core preload");
    preload::build_core_preload(&ctx, &inlined)?;
    ctx.reporter.finish_step("bundle core preload");

    ctx.reporter.start_step("copy themes");
    theme::copy_themes(&ctx, &discovered.themes, &discovered.modules)?;
    ctx.reporter.finish_step("copy themes");

    ctx.reporter.start_step("compile theme stylesheets");
    let themes = theme::compile_themes(&ctx, less_compiler)?;
    ctx.reporter.finish_step("compile theme stylesheets");

    ctx.reporter.start_step("minify CSS");
    theme::minify_all_css(&ctx)?;
    ctx.reporter.finish_step("minify CSS");

    ctx.reporter.start_step("write version manifest");
    manifest::write_manifest(&ctx, &discovered.modules)?;
    ctx.reporter.finish_step("write version manifest");

    Ok(BuildReport {
        target: ctx.target.clone(),
        skipped_existing_target: false,
        modules: discovered.modules.len(),
        debug_scripts,
        resources,
        preload_bundles: preload_bundles + 1,
        themes,
    })
}
