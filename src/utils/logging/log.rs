//! Logging utilities
//!
//! Consistent log lines for reading the statistics sources, so every file
//! reports its start, row count and failure the same way.

use std::path::Path;
use std::time::Duration;

/// Log the start of reading one source
///
/// # Arguments
/// * `source` - Source name as shown in status messages
/// * `path` - File being read
pub fn log_source_start(source: &str, path: &Path) {
    log::info!("Reading {source} from {}", path.display());
}

/// Log a source that was read successfully
///
/// # Arguments
/// * `source` - Source name as shown in status messages
/// * `path` - File that was read
/// * `rows` - Data rows after the preamble and header
/// * `elapsed` - Time spent reading, if measured
pub fn log_source_loaded(source: &str, path: &Path, rows: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!(
            "Loaded {source}: {rows} rows from {} in {duration:?}",
            path.display()
        ),
        None => log::info!("Loaded {source}: {rows} rows from {}", path.display()),
    }
}

/// Log a source or directory that could not be used.
///
/// Missing inputs are logged as warnings, never as errors.
pub fn log_unavailable(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{message} ({})", path.display());
    } else {
        log::warn!("{message}");
    }
}
