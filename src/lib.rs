//! # MicroDDL
//!
//! A compiler for MicroDDL, a compact line-oriented language for describing
//! relational tables, into JSON models.
//!
//! MicroDDL provides:
//! - Table stanzas with single-character column type sigils
//! - Per-table authorization policies with role defaults
//! - PICT user-interface view configuration
//! - Recursive `[Include ...]` resolution across files
//! - Derived per-table schemas with JSON-Schema descriptions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use microddl::prelude::*;
//!
//! let compilation = parse_mddl("!Book\n@IDBook\n$Title 200\n")?;
//! let book = compilation.model.get_table("Book").unwrap();
//! assert_eq!(book.columns.len(), 2);
//!
//! // Writes model/MeadowModel.json, MeadowModel-Extended.json and
//! // MeadowModel-PICT.json
//! compile("Model.mddl", "model", "MeadowModel")?;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// MicroDDL parsing, model types and the compiler.
pub mod schema {
    pub use microddl_schema::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::schema::{
        Compiler, MicroDdlConfig, Model, compile, load_model, parse_mddl, parse_mddl_file,
    };
}

// Re-export key types at the crate root
pub use schema::{Compilation, Model, SchemaError};
