//! Logging utilities for output and progress tracking
//!
//! This module provides utilities for logging and console output.

pub mod console;
pub mod log;

// Re-export commonly used functions for convenience
pub use console::{print_head, print_missing_values, print_record_batch, print_schema_info};
pub use self::log::{log_operation_complete, log_operation_start};
