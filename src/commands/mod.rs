//! Command implementations

pub mod build;
pub mod bust;
pub mod completions;
pub mod fetch;
pub mod version;

use std::path::PathBuf;

use crate::progress::{InteractiveReporter, ProgressReporter, SilentReporter};

/// Progress reporter for a command invocation, honoring `--quiet`
pub(crate) fn reporter(quiet: bool) -> Box<dyn ProgressReporter> {
    if quiet {
        Box::new(SilentReporter)
    } else {
        Box::new(InteractiveReporter::new())
    }
}

/// Project directory the command operates in
pub(crate) fn project_dir(project: Option<PathBuf>) -> PathBuf {
    project.unwrap_or_else(|| PathBuf::from("."))
}
