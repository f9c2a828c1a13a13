//! Pest grammar for MicroDDL directive lines.

use pest_derive::Parser;

/// The MicroDDL directive parser.
#[derive(Parser)]
#[grammar = "parser/mddl.pest"]
pub struct MddlParser;
