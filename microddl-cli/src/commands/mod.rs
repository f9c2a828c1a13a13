//! CLI command implementations.

pub mod compile;
pub mod info;
pub mod version;
