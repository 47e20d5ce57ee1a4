//! Source file reading.
//!
//! Source documents are read as raw bytes; UTF-8 validation is left to the
//! converter so that bad input surfaces as a conversion error. Large files
//! are memory mapped.

// Memory mapping requires unsafe but is well-documented and safe for read-only access
#![allow(unsafe_code)]

use crate::error::{IoError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Threshold for using memory mapping (1MB).
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Maximum source size (64MB). Nobody threads a document this large.
const MAX_SOURCE_SIZE: u64 = 64 * 1024 * 1024;

/// Reads a source file into memory.
///
/// # Errors
///
/// Returns an [`IoError`] if the file is missing, too large or unreadable.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }

    let read_failed = |e: std::io::Error| IoError::ReadFailed {
        path: path_str.clone(),
        reason: e.to_string(),
    };

    let mut file = File::open(path).map_err(read_failed)?;
    let size = file.metadata().map_err(read_failed)?.len();

    if size > MAX_SOURCE_SIZE {
        return Err(IoError::ReadFailed {
            path: path_str.clone(),
            reason: format!("file too large: {size} bytes (max: {MAX_SOURCE_SIZE} bytes)"),
        }
        .into());
    }

    if size >= MMAP_THRESHOLD {
        // Safety: the mapping is read-only and copied out immediately.
        let mmap = unsafe {
            Mmap::map(&file).map_err(|e| IoError::MmapFailed {
                path: path_str.clone(),
                reason: e.to_string(),
            })?
        };
        return Ok(mmap.to_vec());
    }

    #[allow(clippy::cast_possible_truncation)]
    let mut buffer = Vec::with_capacity(size as usize);
    file.read_to_end(&mut buffer).map_err(read_failed)?;
    Ok(buffer)
}

/// Reads all of standard input.
///
/// # Errors
///
/// Returns an [`IoError`] if stdin cannot be read.
pub fn read_stdin() -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .map_err(|e| IoError::ReadFailed {
            path: "<stdin>".to_string(),
            reason: e.to_string(),
        })?;
    Ok(buffer)
}
