//! Utility functions for error handling
//!
//! File access helpers that turn bare I/O failures into errors carrying the
//! path and the reason the file was needed.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
            purpose: purpose.to_string(),
        });
    }

    if !path.is_file() {
        return Err(Error::io(
            path,
            format!("Expected a file for: {purpose}"),
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a file"),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions".to_string(),
            io::ErrorKind::NotFound => {
                "File not found - it may have been deleted during operation".to_string()
            }
            _ => format!("Failed to open file for: {purpose}"),
        };
        Error::io(path, context, e)
    })
}

/// Create (or truncate) a file for writing, creating parent directories first
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent, purpose)?;
    }

    fs::File::create(path)
        .map_err(|e| Error::io(path, format!("Failed to create file for: {purpose}"), e))
}

/// Make sure a directory exists, creating it when missing
pub fn ensure_directory(path: &Path, purpose: &str) -> Result<()> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(path)
        .map_err(|e| Error::io(path, format!("Failed to create directory for: {purpose}"), e))
}
