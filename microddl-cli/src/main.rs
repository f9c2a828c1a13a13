//! MicroDDL CLI - Command-line interface for the MicroDDL compiler.

use clap::Parser;

use microddl_cli::cli::{Cli, Command};
use microddl_cli::commands;
use microddl_cli::config;
use microddl_cli::error::CliResult;
use microddl_cli::logging;
use microddl_cli::output;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref())?;
    logging::init(&config.debug, cli.verbose);

    match cli.command {
        Command::Compile(args) => commands::compile::run(args, &config).await,
        Command::Info(args) => commands::info::run(args, &config).await,
        Command::Version => commands::version::run().await,
    }
}
