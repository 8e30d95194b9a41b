//! Build command implementation

use std::path::PathBuf;

use crate::cli::BuildArgs;
use crate::config::{self, ProjectConfig};
use crate::context::BuildContext;
use crate::error::Result;
use crate::library;
use crate::theme::compiler::LesscCli;

/// Run build command
pub fn run(
    project: Option<PathBuf>,
    args: BuildArgs,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let project_dir = super::project_dir(project);
    let config = ProjectConfig::load(&project_dir)?;

    let version = config::require(args.build_version, config.library.version, "build-version")?;
    let source = project_dir.join(config::require(
        args.source,
        config.library.source,
        "source",
    )?);
    let target = project_dir.join(config::require(
        args.target,
        config.library.target,
        "target",
    )?);

    if verbose {
        println!("Building version {version}");
        println!("  source: {}", source.display());
        println!("  target: {}", target.display());
        println!("  core module: {}", config.build.core_module);
    }

    let reporter = super::reporter(quiet);
    let ctx = BuildContext::new(source, target, version, config.build, reporter.as_ref());
    let report = library::build_library(ctx, &LesscCli)?;

    if quiet {
        return Ok(());
    }
    if report.skipped_existing_target {
        println!(
            "Target {} already exists; delete it to rebuild",
            report.target.display()
        );
    } else {
        println!(
            "Built {} modules into {}",
            report.modules,
            report.target.display()
        );
        println!(
            "  {} resources, {} debug scripts, {} preload bundles, {} themes compiled, {} skipped",
            report.resources,
            report.debug_scripts,
            report.preload_bundles,
            report.themes.compiled,
            report.themes.skipped
        );
    }
    Ok(())
}
