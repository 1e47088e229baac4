//! Logging utilities
//!
//! This module provides consistent log lines for source loading.

pub mod log;

pub use self::log::{log_source_loaded, log_source_start, log_unavailable};
