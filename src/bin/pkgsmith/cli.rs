//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// pkgsmith - template scaffolding for front-end library packages
#[derive(Parser)]
#[command(name = "pkgsmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the generator and copy template files into the package
    Generate(GenerateArgs),

    /// Report files that differ from the template directory
    Check(CheckArgs),

    /// List built-in presets, or print one as template.toml
    Presets(PresetsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// How to obtain the template spec.
#[derive(Args, Debug)]
pub struct SpecArgs {
    /// Use a built-in preset instead of template.toml
    #[arg(long, conflicts_with = "config")]
    pub preset: Option<String>,

    /// Path to a spec file (defaults to <PATH>/template.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Package root (defaults to current directory)
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub spec: SpecArgs,

    /// Run this program as the generator instead of the configured one
    #[arg(long, value_name = "PROGRAM")]
    pub generator_cmd: Option<String>,

    /// Argument passed to --generator-cmd (repeatable)
    #[arg(long, value_name = "ARG", requires = "generator_cmd", allow_hyphen_values = true)]
    pub generator_arg: Vec<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Package root (defaults to current directory)
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub spec: SpecArgs,
}

#[derive(Args)]
pub struct PresetsArgs {
    /// Preset to print as template.toml
    pub name: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
