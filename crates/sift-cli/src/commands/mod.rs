//! Subcommand implementations.

pub mod config;
pub mod filter;
pub mod r#match;
pub mod parse;
pub mod tokenize;
