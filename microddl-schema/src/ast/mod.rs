//! Compiled model types for MicroDDL.
//!
//! The serialized field names follow the JSON layout consumed by downstream
//! generators (`TableName`, `Columns`, `DataType`, ...), so every type here
//! renames its fields to PascalCase.

mod authorization;
mod derived;
mod model;
mod pict;
mod table;
mod types;

pub use authorization::*;
pub use derived::*;
pub use model::*;
pub use pict::*;
pub use table::*;
pub use types::*;
