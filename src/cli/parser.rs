//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::thread::DEFAULT_MAX_LEN;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// threadify: turn long-form copy into social threads.
///
/// Converts prose into post-sized chunks, stores documents and their
/// threads, and publishes threads through a posting sink.
#[derive(Parser, Debug)]
#[command(name = "threadify")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the threadify database file.
    ///
    /// Defaults to `.threadify/threadify.db` in the current directory.
    #[arg(short, long, env = "THREADIFY_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the database.
    Init {
        /// Force re-initialization (destroys existing data).
        #[arg(short, long)]
        force: bool,
    },

    /// Show store statistics.
    Status,

    /// Delete all stored data.
    Reset {
        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Convert a file (or stdin) into a thread without storing anything.
    Convert {
        /// Source file; reads stdin when omitted or `-`.
        file: Option<PathBuf>,

        /// Thread title.
        #[arg(short, long)]
        title: Option<String>,

        #[command(flatten)]
        options: ConvertOptions,
    },

    /// Store a source document.
    Add {
        /// Source file; reads stdin when `-`.
        file: PathBuf,

        /// Unique name for the document.
        #[arg(short, long)]
        name: Option<String>,

        /// Thread title.
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List stored documents.
    #[command(name = "list", alias = "ls")]
    List,

    /// Show a stored document.
    Show {
        /// Document ID or name.
        document: String,

        /// Show the stored thread as well.
        #[arg(long)]
        thread: bool,
    },

    /// Convert a stored document and save its thread.
    Thread {
        /// Document ID or name.
        document: String,

        #[command(flatten)]
        options: ConvertOptions,
    },

    /// Publish a stored thread, one file per post.
    Publish {
        /// Document ID or name.
        document: String,

        /// Directory receiving the posts.
        #[arg(short, long, default_value = ".threadify/outbox")]
        out_dir: PathBuf,

        /// Keep posting after a failed post.
        #[arg(long)]
        keep_going: bool,
    },

    /// Delete a stored document.
    #[command(name = "delete", alias = "rm")]
    Delete {
        /// Document ID or name.
        document: String,

        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Conversion options shared by `convert` and `thread`.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Maximum characters per post.
    #[arg(long, default_value_t = DEFAULT_MAX_LEN)]
    pub max_len: usize,

    /// Hard-wrap sentences that exceed the limit instead of keeping them whole.
    #[arg(long)]
    pub strict: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            strict: false,
        }
    }
}

impl Cli {
    /// Returns the database path, using the default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::storage::DEFAULT_DB_PATH))
    }
}
