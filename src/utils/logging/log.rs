//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

use std::path::Path;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory that was operated on
/// * `rows` - Number of rows processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    rows: usize,
    elapsed: Option<std::time::Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!(
            "Successfully {} {} rows {} {} in {:?}",
            operation,
            rows,
            preposition(operation),
            path.display(),
            duration
        );
    } else {
        log::info!(
            "Successfully {} {} rows {} {}",
            operation,
            rows,
            preposition(operation),
            path.display()
        );
    }
}

fn preposition(operation: &str) -> &'static str {
    if operation.starts_with("wr") { "to" } else { "from" }
}
