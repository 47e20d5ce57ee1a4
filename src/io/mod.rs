//! I/O utilities for threadify.
//!
//! Reads source documents from files (memory mapped when large) or stdin.

pub mod reader;

pub use reader::{read_source, read_stdin};
