//! Utility functions for error handling
//!
//! File access helpers that turn IO failures into descriptive
//! [`Error::SourceUnavailable`] values.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Name of the source the file is needed for (used in the error)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(Error::unavailable(
            purpose,
            format!("file not found: {}", path.display()),
        ));
    }

    if !path.is_file() {
        return Err(Error::unavailable(
            purpose,
            format!("path is not a file: {}", path.display()),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let reason = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                format!("permission denied: {}", path.display())
            }
            io::ErrorKind::NotFound => {
                format!("file disappeared while opening: {}", path.display())
            }
            _ => format!("failed to open {}: {e}", path.display()),
        };
        Error::unavailable(purpose, reason)
    })
}

/// Check if a directory exists and is readable
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(Error::unavailable(
            purpose,
            format!("directory not found: {}", path.display()),
        ));
    }

    if !path.is_dir() {
        return Err(Error::unavailable(
            purpose,
            format!("path is not a directory: {}", path.display()),
        ));
    }

    match fs::read_dir(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            let reason = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    format!("permission denied: {}", path.display())
                }
                _ => format!("failed to access {}: {e}", path.display()),
            };
            Err(Error::unavailable(purpose, reason))
        }
    }
}
