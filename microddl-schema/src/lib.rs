//! # microddl-schema
//!
//! Compiler for MicroDDL, a line-oriented schema language.
//!
//! This crate provides:
//! - The MicroDDL parser: line tokenizer, stanza state machine and PICT
//!   property parser, with recursive `[Include ...]` resolution
//! - The compiled model: tables, authorization policies, endpoints and PICT
//!   view configuration
//! - Derived per-table schemas (type tags, default records, JSON-Schema)
//! - The compiler facade writing the base, extended and PICT JSON artifacts
//! - A loader for compiled artifacts and a parser for `microddl.toml`
//!
//! ## Example
//!
//! ```rust,ignore
//! use microddl_schema::{compile, parse_mddl};
//!
//! let compilation = parse_mddl("!User\n@IDUser\n$UserName 32\n")?;
//! assert_eq!(compilation.model.tables["User"].default_identifier(), "IDUser");
//!
//! // Writes model/MeadowModel.json, -Extended.json and -PICT.json
//! compile("Model.mddl", "model/", "MeadowModel")?;
//! ```

pub mod ast;
pub mod builder;
pub mod compiler;
pub mod config;
pub mod defaults;
pub mod derive;
pub mod error;
pub mod include;
pub mod loader;
pub mod parser;

pub use ast::*;
pub use builder::ModelBuilder;
pub use compiler::{ArtifactPaths, CompileOptions, Compiler, compile};
pub use config::MicroDdlConfig;
pub use derive::{derive_all, derive_schema};
pub use error::{SchemaError, SchemaResult};
pub use loader::{LoadedModel, load_model};
pub use parser::{Compilation, ParseWarning, WarningKind, parse_mddl, parse_mddl_file};
