//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::cli::output::{
    OutputFormat, format_document, format_document_list, format_publish_report, format_status,
    format_thread,
};
use crate::cli::parser::{Cli, Commands, ConvertOptions};
use crate::core::SourceDocument;
use crate::error::{CommandError, ConversionError, Result, StorageError};
use crate::io::{read_source, read_stdin};
use crate::publish::{DirectorySink, FailurePolicy, publish_thread};
use crate::storage::{ContentStore, SqliteStore};
use crate::thread::{DEFAULT_MAX_LEN, OversizePolicy, ThreadConfig, ThreadConverter};
use std::path::Path;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();

    match &cli.command {
        Commands::Init { force } => cmd_init(&db_path, *force),
        Commands::Status => cmd_status(&db_path, format),
        Commands::Reset { yes } => cmd_reset(&db_path, *yes),
        Commands::Convert {
            file,
            title,
            options,
        } => cmd_convert(file.as_deref(), title.as_deref(), *options, format),
        Commands::Add { file, name, title } => {
            cmd_add(&db_path, file, name.as_deref(), title.as_deref(), format)
        }
        Commands::List => cmd_list(&db_path, format),
        Commands::Show { document, thread } => cmd_show(&db_path, document, *thread, format),
        Commands::Thread { document, options } => {
            cmd_thread(&db_path, document, *options, format)
        }
        Commands::Publish {
            document,
            out_dir,
            keep_going,
        } => cmd_publish(&db_path, document, out_dir, *keep_going, format),
        Commands::Delete { document, yes } => cmd_delete(&db_path, document, *yes),
    }
}

/// Opens the store and ensures it's initialized.
fn open_store(db_path: &Path) -> Result<SqliteStore> {
    let store = SqliteStore::open(db_path)?;

    if !store.is_initialized()? {
        return Err(StorageError::NotInitialized.into());
    }

    Ok(store)
}

/// Resolves a document identifier (ID or name) to a document.
fn resolve_document(store: &SqliteStore, identifier: &str) -> Result<SourceDocument> {
    if let Ok(id) = identifier.parse::<i64>()
        && let Some(document) = store.get_document(id)?
    {
        return Ok(document);
    }

    if let Some(document) = store.get_document_by_name(identifier)? {
        return Ok(document);
    }

    Err(StorageError::DocumentNotFound {
        identifier: identifier.to_string(),
    }
    .into())
}

/// Builds a converter from command-line options.
fn build_converter(options: ConvertOptions) -> Result<ThreadConverter> {
    let policy = if options.strict {
        OversizePolicy::HardWrap
    } else {
        OversizePolicy::Preserve
    };
    let config = ThreadConfig::new()
        .max_len(options.max_len)
        .oversize(policy);
    ThreadConverter::with_config(config)
}

/// Reads a source file, or stdin for `-`.
fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) if path != Path::new("-") => read_source(path),
        _ => read_stdin(),
    }
}

// ==================== Command Implementations ====================

fn cmd_init(db_path: &Path, force: bool) -> Result<String> {
    if db_path.exists() && !force {
        return Err(CommandError::ExecutionFailed(
            "Database already exists. Use --force to reinitialize.".to_string(),
        )
        .into());
    }

    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CommandError::ExecutionFailed(format!("Failed to create directory: {e}"))
        })?;
    }

    if force && db_path.exists() {
        std::fs::remove_file(db_path).map_err(|e| {
            CommandError::ExecutionFailed(format!("Failed to remove existing database: {e}"))
        })?;
    }

    let mut store = SqliteStore::open(db_path)?;
    store.init()?;

    Ok(format!(
        "Initialized threadify database at: {}\n",
        db_path.display()
    ))
}

fn cmd_status(db_path: &Path, format: OutputFormat) -> Result<String> {
    let store = open_store(db_path)?;
    let stats = store.stats()?;
    Ok(format_status(&stats, format))
}

fn cmd_reset(db_path: &Path, yes: bool) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm reset. This will delete all data.".to_string(),
        )
        .into());
    }

    let mut store = open_store(db_path)?;
    store.reset()?;

    Ok("threadify store reset successfully.\n".to_string())
}

fn cmd_convert(
    file: Option<&Path>,
    title: Option<&str>,
    options: ConvertOptions,
    format: OutputFormat,
) -> Result<String> {
    let converter = build_converter(options)?;
    let bytes = read_input(file)?;
    let thread = converter.convert_bytes(&bytes, title)?;
    Ok(format_thread(&thread, options.max_len, format))
}

fn cmd_add(
    db_path: &Path,
    file: &Path,
    name: Option<&str>,
    title: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let mut store = open_store(db_path)?;

    let bytes = read_input(Some(file))?;
    let body = String::from_utf8(bytes).map_err(ConversionError::from)?;

    let mut document = SourceDocument::new(body);
    let name = name.map(ToString::to_string).or_else(|| {
        (file != Path::new("-"))
            .then(|| file.file_name().map(|n| n.to_string_lossy().to_string()))
            .flatten()
    });
    if let Some(name) = name {
        document = document.with_name(name);
    }
    if let Some(title) = title {
        document = document.with_title(title);
    }

    let id = store.add_document(&document)?;
    document.id = Some(id);
    tracing::info!(id, label = %document.label(), "document added");

    match format {
        OutputFormat::Text => Ok(format!(
            "Added document {} ({} bytes) as ID {id}\n",
            document.label(),
            document.size()
        )),
        OutputFormat::Json => Ok(format_document(&document, None, DEFAULT_MAX_LEN, format)),
    }
}

fn cmd_list(db_path: &Path, format: OutputFormat) -> Result<String> {
    let store = open_store(db_path)?;
    let documents = store.list_documents()?;
    Ok(format_document_list(&documents, format))
}

fn cmd_show(
    db_path: &Path,
    identifier: &str,
    thread: bool,
    format: OutputFormat,
) -> Result<String> {
    let store = open_store(db_path)?;
    let document = resolve_document(&store, identifier)?;

    let stored = match (thread, document.id) {
        (true, Some(id)) => store.load_thread(id)?,
        _ => None,
    };
    let max_len = stored.as_ref().map_or(DEFAULT_MAX_LEN, |s| s.max_len);

    Ok(format_document(
        &document,
        stored.as_ref().map(|s| &s.thread),
        max_len,
        format,
    ))
}

fn cmd_thread(
    db_path: &Path,
    identifier: &str,
    options: ConvertOptions,
    format: OutputFormat,
) -> Result<String> {
    let mut store = open_store(db_path)?;
    let document = resolve_document(&store, identifier)?;
    let id = document.id.ok_or_else(|| StorageError::DocumentNotFound {
        identifier: identifier.to_string(),
    })?;

    let converter = build_converter(options)?;
    let thread = converter.convert_document(&document)?;
    store.save_thread(id, &thread, options.max_len)?;
    tracing::info!(id, chunks = thread.total_chunks, "thread saved");

    Ok(format_thread(&thread, options.max_len, format))
}

fn cmd_publish(
    db_path: &Path,
    identifier: &str,
    out_dir: &Path,
    keep_going: bool,
    format: OutputFormat,
) -> Result<String> {
    let mut store = open_store(db_path)?;
    let document = resolve_document(&store, identifier)?;
    let id = document.id.ok_or_else(|| StorageError::DocumentNotFound {
        identifier: identifier.to_string(),
    })?;
    let stored = store
        .load_thread(id)?
        .ok_or(StorageError::ThreadNotFound { document_id: id })?;

    let policy = if keep_going {
        FailurePolicy::ContinueOnFailure
    } else {
        FailurePolicy::StopOnFailure
    };
    let mut sink = DirectorySink::new(out_dir)?.prefix(&format!("doc{id}"));
    let report = publish_thread(&mut sink, &stored.thread, policy);
    store.record_outcomes(id, &report.outcomes)?;

    Ok(format_publish_report(&report, format))
}

fn cmd_delete(db_path: &Path, identifier: &str, yes: bool) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm deletion.".to_string(),
        )
        .into());
    }

    let mut store = open_store(db_path)?;
    let document = resolve_document(&store, identifier)?;
    let id = document.id.ok_or_else(|| StorageError::DocumentNotFound {
        identifier: identifier.to_string(),
    })?;
    store.delete_document(id)?;

    Ok(format!("Deleted document {}\n", document.label()))
}
