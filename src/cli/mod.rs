//! CLI layer for threadify.
//!
//! Provides the command-line interface using clap, with commands for
//! converting text, managing stored documents and publishing threads.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands, ConvertOptions};
