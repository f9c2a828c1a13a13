//! Error types for compiling and loading MicroDDL models.
//!
//! Only I/O and serialization problems are errors. Lines the parser cannot
//! make sense of are reported as [`ParseWarning`](crate::parser::ParseWarning)s
//! and never abort a compile.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while compiling or loading a model.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading the root MicroDDL file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(microddl::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error reading a file referenced by an `[Include ...]` directive.
    #[error("failed to read include `{path}` (included from {included_from})")]
    #[diagnostic(
        code(microddl::schema::include_failed),
        help("include paths are resolved relative to the including file's directory")
    )]
    IncludeFailed {
        path: String,
        included_from: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing an output artifact or creating the output directory.
    #[error("failed to write `{path}`")]
    #[diagnostic(code(microddl::schema::write_error))]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error serializing an artifact to JSON.
    #[error("failed to serialize the {artifact} artifact")]
    #[diagnostic(code(microddl::schema::serialize_error))]
    SerializeError {
        artifact: String,
        #[source]
        source: serde_json::Error,
    },

    /// A compiled model file did not contain a valid model.
    #[error("invalid compiled model in `{path}`")]
    #[diagnostic(code(microddl::schema::invalid_model))]
    InvalidModel {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    #[diagnostic(code(microddl::schema::config_error))]
    ConfigError { message: String },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(microddl::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },
}

impl SchemaError {
    /// Create a read error for the root file.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create an include read error.
    pub fn include_failed(
        path: impl Into<String>,
        included_from: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::IncludeFailed {
            path: path.into(),
            included_from: included_from.into(),
            source,
        }
    }

    /// Create an artifact write error.
    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error for the named artifact.
    pub fn serialize(artifact: impl Into<String>, source: serde_json::Error) -> Self {
        Self::SerializeError {
            artifact: artifact.into(),
            source,
        }
    }

    /// Check whether this error came from reading input files.
    pub fn is_read_error(&self) -> bool {
        matches!(self, Self::IoError { .. } | Self::IncludeFailed { .. })
    }
}

#[cfg(test)]
#[allow(unused_assignments)]
mod tests {
    use super::*;

    fn not_found() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "file not found")
    }

    #[test]
    fn test_schema_result_type() {
        let ok_result: SchemaResult<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: SchemaResult<i32> = Err(SchemaError::ConfigError {
            message: "test".to_string(),
        });
        assert!(err_result.is_err());
    }

    #[test]
    fn test_io_error_display() {
        let err = SchemaError::io("Model.mddl", not_found());
        let display = format!("{}", err);
        assert!(display.contains("Model.mddl"));
        assert!(err.is_read_error());
    }

    #[test]
    fn test_include_failed_display() {
        let err = SchemaError::include_failed("./sub/Other.mddl", "Model.mddl", not_found());
        let display = format!("{}", err);
        assert!(display.contains("./sub/Other.mddl"));
        assert!(display.contains("Model.mddl"));
        assert!(err.is_read_error());
    }

    #[test]
    fn test_write_error_display() {
        let err = SchemaError::write("model/MeadowModel.json", not_found());
        assert!(format!("{}", err).contains("model/MeadowModel.json"));
        assert!(!err.is_read_error());
    }

    #[test]
    fn test_serialize_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SchemaError::serialize("extended", source);
        assert!(format!("{}", err).contains("extended"));
    }

    #[test]
    fn test_config_error_display() {
        let err = SchemaError::ConfigError {
            message: "unknown prefix".to_string(),
        };
        assert!(format!("{}", err).contains("unknown prefix"));
    }

    #[test]
    fn test_error_debug() {
        let err = SchemaError::io("Model.mddl", not_found());
        let debug = format!("{:?}", err);
        assert!(debug.contains("IoError"));
    }
}
