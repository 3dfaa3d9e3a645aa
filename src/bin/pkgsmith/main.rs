//! pkgsmith CLI - template scaffolding for front-end library packages

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("pkgsmith=debug")
    } else {
        EnvFilter::new("pkgsmith=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Check(args) => commands::check::execute(args),
        Commands::Presets(args) => commands::presets::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
