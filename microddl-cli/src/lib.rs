//! MicroDDL CLI - Command-line interface for the MicroDDL compiler.
//!
//! This crate provides the `microddl` tool: compiling `.mddl` files into
//! JSON model artifacts and summarising compiled models.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
