//! Compiler facade: parse, derive, write artifacts.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{error, info};

use crate::derive::derive_all;
use crate::error::{SchemaError, SchemaResult};
use crate::parser::{Compilation, MicroDdlParser};

/// Default artifact file prefix.
pub const DEFAULT_PREFIX: &str = "MeadowModel";

/// Default JSON indentation width.
pub const DEFAULT_INDENT: usize = 4;

/// Paths of the three artifacts written by one compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// `<prefix>.json`: tables only.
    pub base: PathBuf,
    /// `<prefix>-Extended.json`: the full model with derived schemas.
    pub extended: PathBuf,
    /// `<prefix>-PICT.json`: PICT configuration only.
    pub pict: PathBuf,
}

impl ArtifactPaths {
    pub fn new(output_dir: &Path, prefix: &str) -> Self {
        Self {
            base: output_dir.join(format!("{}.json", prefix)),
            extended: output_dir.join(format!("{}-Extended.json", prefix)),
            pict: output_dir.join(format!("{}-PICT.json", prefix)),
        }
    }

    /// Iterate over the paths in the order they are written.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.base, &self.extended, &self.pict]
            .into_iter()
            .map(PathBuf::as_path)
    }
}

/// Compile options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Spaces per JSON indentation level.
    pub indent: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}

/// Compiles MicroDDL files into JSON artifacts.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile `input` (and its includes) into `output_dir`.
    ///
    /// Writes the base artifact, derives the secondary schemas, then writes
    /// the extended and PICT artifacts. Parse problems are returned as
    /// warnings on the [`Compilation`]; only I/O failures are errors. A failed
    /// write leaves earlier artifacts in place.
    pub fn compile(&self, input: &Path, output_dir: &Path, prefix: &str) -> SchemaResult<Compilation> {
        let artifacts = ArtifactPaths::new(output_dir, prefix);
        info!(input = %input.display(), output = %output_dir.display(), prefix, "compiling MicroDDL to JSON");

        std::fs::create_dir_all(output_dir).map_err(|e| {
            error!(path = %output_dir.display(), "error creating output directory: {}", e);
            SchemaError::write(output_dir.display().to_string(), e)
        })?;

        let mut compilation = MicroDdlParser::new().parse_file(input)?;

        self.write_artifact("base", &artifacts.base, &compilation.model.base())?;
        derive_all(&mut compilation.model);
        self.write_artifact("extended", &artifacts.extended, &compilation.model)?;
        self.write_artifact("PICT", &artifacts.pict, &compilation.model.pict)?;

        info!(
            tables = compilation.model.table_count(),
            warnings = compilation.warnings.len(),
            "compile stages completed"
        );
        Ok(compilation)
    }

    fn write_artifact<T: Serialize>(&self, artifact: &str, path: &Path, value: &T) -> SchemaResult<()> {
        let json = render_json(value, self.options.indent)
            .map_err(|e| SchemaError::serialize(artifact, e))?;
        std::fs::write(path, json).map_err(|e| {
            error!(path = %path.display(), artifact, "error writing artifact: {}", e);
            SchemaError::write(path.display().to_string(), e)
        })?;
        info!(path = %path.display(), artifact, "artifact written");
        Ok(())
    }
}

/// Compile with default options.
pub fn compile(input: impl AsRef<Path>, output_dir: impl AsRef<Path>, prefix: &str) -> SchemaResult<Compilation> {
    Compiler::new().compile(input.as_ref(), output_dir.as_ref(), prefix)
}

/// Pretty-print a value as JSON with `indent` spaces per level.
pub fn render_json<T: Serialize + ?Sized>(value: &T, indent: usize) -> serde_json::Result<String> {
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_artifact_paths() {
        let paths = ArtifactPaths::new(Path::new("out"), "Model");
        assert_eq!(paths.base, PathBuf::from("out/Model.json"));
        assert_eq!(paths.extended, PathBuf::from("out/Model-Extended.json"));
        assert_eq!(paths.pict, PathBuf::from("out/Model-PICT.json"));
        assert_eq!(paths.iter().count(), 3);
    }

    #[test]
    fn test_render_json_indent() {
        let value = json!({ "Tables": { "User": 1 } });
        assert_eq!(
            render_json(&value, 4).unwrap(),
            "{\n    \"Tables\": {\n        \"User\": 1\n    }\n}"
        );
        assert_eq!(render_json(&value, 2).unwrap().lines().nth(1), Some("  \"Tables\": {"));
    }

    #[test]
    fn test_compile_writes_three_artifacts() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Model.mddl");
        std::fs::write(&input, "!User\n@IDUser\n$UserName 32\n\n[PICT-List User]\nUserName\n").unwrap();
        let output = dir.path().join("out/nested");

        let compilation = compile(&input, &output, DEFAULT_PREFIX).unwrap();
        assert_eq!(compilation.model.table_count(), 1);

        let paths = ArtifactPaths::new(&output, DEFAULT_PREFIX);
        let base: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.base).unwrap()).unwrap();
        assert_eq!(base.as_object().unwrap().len(), 1);
        assert!(base["Tables"]["User"].get("DerivedSchema").is_none());

        let extended: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.extended).unwrap()).unwrap();
        assert_eq!(
            extended["Tables"]["User"]["DerivedSchema"]["DefaultIdentifier"],
            "IDUser"
        );
        assert_eq!(extended["TablesSequence"], json!(["User"]));
        for key in ["Authorization", "Endpoints", "Pict"] {
            assert!(extended.get(key).is_some(), "missing {}", key);
        }

        let pict: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.pict).unwrap()).unwrap();
        assert_eq!(pict["User"]["List"]["Columns"][0]["Column"], "UserName");
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let err = compile(dir.path().join("nope.mddl"), dir.path(), "Model").unwrap_err();
        assert!(err.is_read_error());
        assert!(!ArtifactPaths::new(dir.path(), "Model").base.exists());
    }
}
