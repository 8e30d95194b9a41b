//! Fetch command implementation

use std::path::PathBuf;

use crate::cli::FetchArgs;
use crate::config::{self, ProjectConfig};
use crate::error::Result;
use crate::fetch;

/// Archive URL template used when neither flag nor config names one
const DEFAULT_URL_TEMPLATE: &str = "https://github.com/SAP/openui5/archive/{version}.zip";

/// Download directory used when neither flag nor config names one
const DEFAULT_DOWNLOAD_DIR: &str = "ui5";

/// Run fetch command
pub fn run(
    project: Option<PathBuf>,
    args: FetchArgs,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let project_dir = super::project_dir(project);
    let config = ProjectConfig::load(&project_dir)?;

    let version = config::require(args.version, config.library.version, "version")?;
    let url = args
        .url
        .or(config.library.url)
        .unwrap_or_else(|| DEFAULT_URL_TEMPLATE.to_string())
        .replace("{version}", &version);
    let download_dir = project_dir.join(
        args.download_dir
            .or(config.library.download_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR)),
    );

    if verbose {
        println!("Fetching version {version}");
        println!("  url: {url}");
        println!("  download dir: {}", download_dir.display());
    }

    let reporter = super::reporter(quiet);
    let unpacked = fetch::fetch_library(&url, &download_dir, &version, reporter.as_ref())?;

    if !quiet {
        println!("Framework sources at {}", unpacked.display());
    }
    Ok(())
}
