//! `microddl compile` command - Compile a MicroDDL file into JSON artifacts.

use std::path::PathBuf;

use microddl_schema::{ArtifactPaths, Compiler, MicroDdlConfig};

use crate::cli::CompileArgs;
use crate::error::CliResult;
use crate::output::{self, success, warn};

/// Run the compile command
pub async fn run(args: CompileArgs, config: &MicroDdlConfig) -> CliResult<()> {
    output::header("Compile MicroDDL");

    let input = args
        .input
        .unwrap_or_else(|| PathBuf::from(&config.compile.input));
    let output_dir = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.compile.output));
    let prefix = args.prefix.unwrap_or_else(|| config.compile.prefix.clone());

    output::kv("Input", &input.display().to_string());
    output::kv("Output", &output_dir.display().to_string());
    output::kv("Prefix", &prefix);
    output::newline();

    let compiler = Compiler::with_options(config.compile_options());
    let compilation = compiler.compile(&input, &output_dir, &prefix)?;

    if !compilation.is_clean() {
        output::section("Warnings");
        for warning in &compilation.warnings {
            warn(&warning.to_string());
        }
        output::newline();
    }

    success(&format!(
        "Compiled {} tables ({} columns) from {} file(s)",
        compilation.stats.tables, compilation.stats.columns, compilation.stats.files
    ));
    output::newline();

    output::section("Artifacts");
    for path in ArtifactPaths::new(&output_dir, &prefix).iter() {
        output::list_item(&path.display().to_string());
    }

    Ok(())
}
