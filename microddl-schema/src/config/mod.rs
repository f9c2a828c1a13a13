//! Configuration file parsing for `microddl.toml`.

use std::path::Path;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::compiler::{CompileOptions, DEFAULT_INDENT, DEFAULT_PREFIX};
use crate::error::{SchemaError, SchemaResult};

/// Conventional configuration file name.
pub const CONFIG_FILE_NAME: &str = "microddl.toml";

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// Largest accepted `pretty_indent`.
const MAX_INDENT: usize = 16;

/// Main configuration structure for `microddl.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MicroDdlConfig {
    /// Compile defaults.
    #[serde(default)]
    pub compile: CompileConfig,

    /// Debug/logging settings.
    #[serde(default)]
    pub debug: DebugConfig,
}

impl MicroDdlConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> SchemaResult<Self> {
        let expanded = expand_env_vars(content);
        let config: Self =
            toml::from_str(&expanded).map_err(|e| SchemaError::TomlError { source: e })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values TOML types cannot express.
    pub fn validate(&self) -> SchemaResult<()> {
        if self.compile.prefix.trim().is_empty() {
            return Err(SchemaError::ConfigError {
                message: "compile.prefix must not be empty".to_string(),
            });
        }
        if self.compile.pretty_indent > MAX_INDENT {
            return Err(SchemaError::ConfigError {
                message: format!(
                    "compile.pretty_indent must be at most {}, got {}",
                    MAX_INDENT, self.compile.pretty_indent
                ),
            });
        }
        Ok(())
    }

    /// Compiler options described by this configuration.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            indent: self.compile.pretty_indent,
        }
    }
}

/// `[compile]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CompileConfig {
    /// Root MicroDDL file.
    #[serde(default = "default_input")]
    pub input: String,

    /// Directory the artifacts are written to.
    #[serde(default = "default_output")]
    pub output: String,

    /// Artifact file name prefix.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Spaces per JSON indentation level.
    #[serde(default = "default_indent")]
    pub pretty_indent: usize,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            prefix: default_prefix(),
            pretty_indent: default_indent(),
        }
    }
}

fn default_input() -> String { "./Model.mddl".to_string() }
fn default_output() -> String { "./model/".to_string() }
fn default_prefix() -> String { DEFAULT_PREFIX.to_string() }
fn default_indent() -> usize { DEFAULT_INDENT }

/// `[debug]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugConfig {
    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl LogLevel {
    /// Get the level as an `EnvFilter` directive.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

/// Expand `${VAR}` references from the environment.
///
/// Unset variables are left as written.
fn expand_env_vars(content: &str) -> String {
    ENV_VAR
        .replace_all(content, |caps: &regex_lite::Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = MicroDdlConfig::default();
        assert_eq!(config.compile.input, "./Model.mddl");
        assert_eq!(config.compile.output, "./model/");
        assert_eq!(config.compile.prefix, "MeadowModel");
        assert_eq!(config.compile_options(), CompileOptions::default());
        assert_eq!(config.debug.log_level, LogLevel::Info);
        assert_eq!(config.debug.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [compile]
            input = "schema/Root.mddl"
            output = "build/model"
            prefix = "Bookstore"
            pretty_indent = 2

            [debug]
            log_level = "debug"
            log_format = "json"
        "#;

        let config = MicroDdlConfig::from_str(toml).unwrap();
        assert_eq!(config.compile.input, "schema/Root.mddl");
        assert_eq!(config.compile.prefix, "Bookstore");
        assert_eq!(config.compile_options().indent, 2);
        assert_eq!(config.debug.log_level, LogLevel::Debug);
        assert_eq!(config.debug.log_format, LogFormat::Json);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = MicroDdlConfig::from_str("[compile]\nprefix = \"Other\"\n").unwrap();
        assert_eq!(config.compile.prefix, "Other");
        assert_eq!(config.compile.input, "./Model.mddl");
        assert_eq!(config.compile.pretty_indent, 4);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = MicroDdlConfig::from_str("[compile]\nfrobnicate = true\n").unwrap_err();
        assert!(matches!(err, SchemaError::TomlError { .. }));

        let err = MicroDdlConfig::from_str("[database]\nurl = \"x\"\n").unwrap_err();
        assert!(matches!(err, SchemaError::TomlError { .. }));
    }

    #[test]
    fn test_validation() {
        let err = MicroDdlConfig::from_str("[compile]\nprefix = \" \"\n").unwrap_err();
        assert!(matches!(err, SchemaError::ConfigError { .. }));

        let err = MicroDdlConfig::from_str("[compile]\npretty_indent = 40\n").unwrap_err();
        assert!(matches!(err, SchemaError::ConfigError { .. }));
    }

    #[test]
    fn test_env_var_expansion() {
        // SAFETY: This test runs single-threaded and we clean up after
        unsafe {
            std::env::set_var("MICRODDL_TEST_OUTPUT", "/tmp/microddl-out");
        }
        let expanded = expand_env_vars("output = \"${MICRODDL_TEST_OUTPUT}\"");
        assert_eq!(expanded, "output = \"/tmp/microddl-out\"");
        unsafe {
            std::env::remove_var("MICRODDL_TEST_OUTPUT");
        }

        let untouched = expand_env_vars("output = \"${MICRODDL_TEST_UNSET_VAR}\"");
        assert_eq!(untouched, "output = \"${MICRODDL_TEST_UNSET_VAR}\"");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[compile]\ninput = \"Other.mddl\"\n").unwrap();

        let config = MicroDdlConfig::from_file(&path).unwrap();
        assert_eq!(config.compile.input, "Other.mddl");

        let err = MicroDdlConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, SchemaError::IoError { .. }));
    }
}
