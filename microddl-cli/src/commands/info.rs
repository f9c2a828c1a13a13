//! `microddl info` command - Summarize a compiled model.

use std::path::PathBuf;

use microddl_schema::{ArtifactPaths, MicroDdlConfig, load_model};

use crate::cli::InfoArgs;
use crate::error::{CliError, CliResult};
use crate::output::{self, kv};

/// Run the info command
pub async fn run(args: InfoArgs, config: &MicroDdlConfig) -> CliResult<()> {
    output::header("Model Info");

    let model_path = args.model.unwrap_or_else(|| {
        ArtifactPaths::new(
            &PathBuf::from(&config.compile.output),
            &config.compile.prefix,
        )
        .extended
    });

    if !model_path.exists() {
        return Err(CliError::Config(format!(
            "Model file not found: {}",
            model_path.display()
        )));
    }

    let loaded = load_model(&model_path)?;
    let model = &loaded.model;

    kv("File", &model_path.display().to_string());
    kv("Extended", if loaded.extended { "yes" } else { "no" });
    kv("Tables", &model.table_count().to_string());
    kv("Columns", &model.column_count().to_string());
    output::newline();

    output::section("Tables");
    for table in model.tables_in_order() {
        output::list_item(&format!("{} ({} columns)", table.name, table.columns.len()));
    }

    Ok(())
}
