//! Logging utilities for output and progress tracking
//!
//! Standardized log messages, console rendering and progress spinners.

pub mod console;
pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use log::{log_operation_complete, log_operation_start, log_warning};
pub use progress::{create_spinner, finish_spinner};
pub use console::{print_comparison, print_dataset_summary, print_details, print_insights, print_page};
