//! Loading compiled model artifacts back from disk.

use std::path::Path;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{error, info, warn};

use crate::ast::Model;
use crate::error::{SchemaError, SchemaResult};

/// A compiled model read from a base or extended artifact.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub model: Model,
    /// Identity column name to the table it identifies.
    pub identity_index: IndexMap<SmolStr, SmolStr>,
    /// The artifact carried authorization, endpoints and PICT data.
    pub extended: bool,
}

impl LoadedModel {
    /// Table a foreign key column refers to, by identity column name.
    pub fn table_for_identity(&self, column: &str) -> Option<&str> {
        self.identity_index.get(column).map(SmolStr::as_str)
    }
}

/// Load a compiled model artifact.
pub fn load_model(path: impl AsRef<Path>) -> SchemaResult<LoadedModel> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading compiled model");

    let raw = std::fs::read_to_string(path).map_err(|e| {
        error!(path = %path.display(), "error loading model file: {}", e);
        SchemaError::io(path.display().to_string(), e)
    })?;
    parse_model(&raw, path)
}

/// Parse a compiled model from JSON text; `path` is used for errors only.
pub fn parse_model(raw: &str, path: &Path) -> SchemaResult<LoadedModel> {
    let invalid = |source: serde_json::Error| SchemaError::InvalidModel {
        path: path.display().to_string(),
        source,
    };

    let value: serde_json::Value = serde_json::from_str(raw).map_err(invalid)?;
    let extended = value.get("Authorization").is_some();
    let model: Model = serde_json::from_value(value).map_err(invalid)?;

    if extended {
        info!(path = %path.display(), "extended model file");
    } else {
        warn!(path = %path.display(), "not an extended model file; authorization and PICT data are absent");
    }

    let identity_index = model.identity_index();
    Ok(LoadedModel {
        model,
        identity_index,
        extended,
    })
}
