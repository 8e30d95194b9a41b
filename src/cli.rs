//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Uikiln - UI framework library builder and cache buster
#[derive(Parser, Debug)]
#[command(
    name = "uikiln",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "UI framework library builder and cache buster",
    long_about = "Uikiln fetches UI framework sources, builds a self-contained library \
                  distribution (minified scripts, debug variants, preload bundles, compiled \
                  themes, version manifest) and cache-busts application entry points with \
                  content-hashed resource paths.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  uikiln fetch --version 1.52.5\n    \
                  uikiln build --source ui5/download-1.52.5 --target webapp/ui5\n    \
                  uikiln bust webapp/index.html\n    \
                  uikiln version\n\n\
                  \x1b[1m\x1b[32mConfiguration:\x1b[0m\n    \
                  uikiln.yaml in the project directory; flags override the file"
)]
pub struct Cli {
    /// Project directory holding uikiln.yaml (defaults to current directory)
    #[arg(long, short = 'p', global = true)]
    pub project: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download and unpack framework sources
    Fetch(FetchArgs),

    /// Build the library distribution from unpacked sources
    Build(BuildArgs),

    /// Cache-bust an application HTML entry point
    Bust(BustArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the fetch command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Fetch using uikiln.yaml (version, url, download_dir):\n    uikiln fetch\n\n\
                  Fetch a specific version:\n    uikiln fetch --version 1.52.5\n\n\
                  Fetch from an explicit archive URL:\n    uikiln fetch --version 1.52.5 \\\n      --url https://github.com/SAP/openui5/archive/1.52.5.zip\n\n\
                  Unpack into a custom directory:\n    uikiln fetch --version 1.52.5 --download-dir vendor/ui5")]
pub struct FetchArgs {
    /// Framework version to fetch
    #[arg(long)]
    pub version: Option<String>,

    /// Source archive URL (zip)
    #[arg(long)]
    pub url: Option<String>,

    /// Directory the archive is unpacked into
    #[arg(long)]
    pub download_dir: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Build using uikiln.yaml (source, target, version):\n    uikiln build\n\n\
                  Build from an explicit source tree:\n    uikiln build --source ui5/download-1.52.5 --target webapp/ui5\n\n\
                  Override the version label:\n    uikiln build --build-version 1.52.5-patched")]
pub struct BuildArgs {
    /// Root of the unpacked framework sources
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Target directory for the built distribution
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Version label embedded in banner and manifest
    #[arg(long = "build-version")]
    pub build_version: Option<String>,
}

/// Arguments for the bust command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Cache-bust an entry point in place:\n    uikiln bust webapp/index.html\n\n\
                  Bust a deployed copy:\n    uikiln bust dist/index.html")]
pub struct BustArgs {
    /// HTML entry point carrying the resource-roots mapping
    pub entry: PathBuf,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    uikiln completions --shell bash > ~/.bash_completion.d/uikiln\n\n\
                  Generate zsh completions:\n    uikiln completions --shell zsh > ~/.zfunc/_uikiln\n\n\
                  Generate fish completions:\n    uikiln completions --shell fish > ~/.config/fish/completions/uikiln.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
