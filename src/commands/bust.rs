//! Bust command implementation

use std::path::PathBuf;

use crate::bust;
use crate::cli::BustArgs;
use crate::error::Result;

/// Run bust command
pub fn run(
    project: Option<PathBuf>,
    args: BustArgs,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let project_dir = super::project_dir(project);
    let entry = project_dir.join(args.entry);

    if verbose {
        println!("Cache busting {}", entry.display());
    }

    let reporter = super::reporter(quiet);
    bust::bust_entry_point(&entry, reporter.as_ref())
}
