//! CLI configuration handling.

use std::path::Path;

use microddl_schema::MicroDdlConfig;
use microddl_schema::config::CONFIG_FILE_NAME;

use crate::error::{CliError, CliResult};

/// Load the configuration.
///
/// An explicit path must exist. Without one, `microddl.toml` in the working
/// directory is used when present, and the built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> CliResult<MicroDdlConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            Ok(MicroDdlConfig::from_file(path)?)
        }
        None => {
            let path = Path::new(CONFIG_FILE_NAME);
            if path.exists() {
                Ok(MicroDdlConfig::from_file(path)?)
            } else {
                Ok(MicroDdlConfig::default())
            }
        }
    }
}
