//! Utility functions for error handling
//!
//! File helpers that turn `io::Error`s into `KommunError`s carrying the path
//! and the reason the file was needed.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{KommunError, Result};

/// Check that a file exists before it is opened
///
/// # Arguments
/// * `path` - The path to check
/// * `purpose` - Why the file is needed (for error context)
pub fn ensure_file(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(KommunError::io_error(format!("File not found, needed for: {purpose}"))
            .with_path(path));
    }

    if !path.is_file() {
        return Err(KommunError::io_error(format!("Path is not a file, expected one for: {purpose}"))
            .with_path(path));
    }

    Ok(())
}

/// Check if a directory exists and is readable, with rich error information
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(KommunError::io_error(format!("Directory not found, needed for: {purpose}"))
            .with_path(path));
    }

    if !path.is_dir() {
        return Err(KommunError::io_error(format!(
            "Path is not a directory, expected one for: {purpose}"
        ))
        .with_path(path));
    }

    match fs::read_dir(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    "Permission denied - check directory permissions".to_string()
                }
                _ => format!("Failed to access directory for: {purpose}"),
            };

            Err(KommunError::io_error_with_source(context, e).with_path(path))
        }
    }
}

/// Read a file to string asynchronously with rich error information
pub async fn read_to_string(path: &Path, purpose: &str) -> Result<String> {
    ensure_file(path, purpose)?;

    tokio::fs::read_to_string(path).await.map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::InvalidData => {
                "File contains invalid UTF-8 data - cannot read as text".to_string()
            }
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to read file content for: {purpose}"),
        };
        KommunError::io_error_with_source(context, e).with_path(path)
    })
}

/// Write a string to a file, creating parent directories as needed
pub fn write_string(path: &Path, contents: &str, purpose: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            KommunError::io_error_with_source(
                format!("Failed to create directory for: {purpose}"),
                e,
            )
            .with_path(parent)
        })?;
    }

    fs::write(path, contents).map_err(|e| {
        KommunError::io_error_with_source(format!("Failed to write file for: {purpose}"), e)
            .with_path(path)
    })
}
