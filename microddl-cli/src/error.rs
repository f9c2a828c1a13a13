//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

use microddl_schema::SchemaError;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(microddl::config))]
    Config(String),

    /// Compile or load error
    #[error("Schema error: {0}")]
    #[diagnostic(code(microddl::schema))]
    Schema(String),
}

impl From<SchemaError> for CliError {
    fn from(err: SchemaError) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        CliError::Schema(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = CliError::from(SchemaError::io("Model.mddl", io));
        assert_eq!(
            err.to_string(),
            "Schema error: failed to read file: Model.mddl: no such file"
        );
    }
}
