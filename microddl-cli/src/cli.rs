//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// MicroDDL CLI - Compile MicroDDL schemas into JSON models
#[derive(Parser, Debug)]
#[command(name = "microddl")]
#[command(version)]
#[command(about = "MicroDDL CLI - Compile MicroDDL schemas into JSON models", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to the configuration file (defaults to ./microddl.toml when present)
    #[arg(short, long, global = true, env = "MICRODDL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a MicroDDL file into JSON model artifacts
    Compile(CompileArgs),

    /// Summarize a compiled model file
    Info(InfoArgs),

    /// Display version information
    Version,
}

// =============================================================================
// Compile Command
// =============================================================================

/// Arguments for the `compile` command
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Root MicroDDL file
    pub input: Option<PathBuf>,

    /// Output directory for the JSON artifacts
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File name prefix of the JSON artifacts
    #[arg(short, long)]
    pub prefix: Option<String>,
}

// =============================================================================
// Info Command
// =============================================================================

/// Arguments for the `info` command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Compiled model file (defaults to the extended artifact of the configured output)
    pub model: Option<PathBuf>,
}
