//! IO utilities for file operations
//!
//! This module provides utilities for working with data formats like Parquet.

pub mod parquet;

// Re-export commonly used functions for convenience
pub use parquet::{find_parquet_files, load_parquet_files_parallel, read_parquet};
