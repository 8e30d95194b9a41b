//! Uikiln - UI framework library builder and cache buster
//!
//! A command line tool that fetches UI framework sources, builds a
//! self-contained library distribution (minified scripts, debug variants,
//! preload bundles, compiled themes, version manifest) and cache-busts
//! application entry points with content-hashed resource paths.

use clap::Parser;

mod bust;
mod cli;
mod commands;
mod config;
mod context;
mod error;
mod fetch;
mod fsutil;
mod hash;
mod library;
mod minify;
mod progress;
mod template;
mod theme;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch(args) => commands::fetch::run(cli.project, args, cli.verbose, cli.quiet),
        Commands::Build(args) => commands::build::run(cli.project, args, cli.verbose, cli.quiet),
        Commands::Bust(args) => commands::bust::run(cli.project, args, cli.verbose, cli.quiet),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
