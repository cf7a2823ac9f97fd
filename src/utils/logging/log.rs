//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

use std::time::Duration;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `source` - Record source being operated on (URL or path)
pub fn log_operation_start(operation: &str, source: &str) {
    log::info!("{operation} {source}");
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `source` - Record source that was operated on
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, source: &str, items: usize, elapsed: Option<Duration>) {
    if let Some(duration) = elapsed {
        log::info!("Successfully {operation} {items} items from {source} in {duration:?}");
    } else {
        log::info!("Successfully {operation} {items} items from {source}");
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `source` - Optional source related to the warning
pub fn log_warning(message: &str, source: Option<&str>) {
    if let Some(source) = source {
        log::warn!("{message}: {source}");
    } else {
        log::warn!("{message}");
    }
}
