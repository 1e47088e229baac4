//! Memoization of the raw load step.
//!
//! The cache holds a single entry keyed by the resolved source paths, their
//! modification times and the preamble widths the files are read with. Any
//! change to those, or an explicit [`DatasetCache::invalidate`], forces a
//! reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::config::DashboardConfig;
use crate::loader::{RawDataset, load_dataset};

/// Identity of one load: every source path with its modification time,
/// plus the preamble rows skipped in each kind of file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    /// `(path, modified)` in load order; `None` when the file is missing
    pub sources: Vec<(PathBuf, Option<SystemTime>)>,
    pub population_skip_rows: usize,
    pub age_skip_rows: usize,
}

impl CacheKey {
    /// Compute the key for the configured sources
    #[must_use]
    pub fn for_config(config: &DashboardConfig) -> Self {
        Self {
            sources: config
                .resolved_paths()
                .into_iter()
                .map(|path| {
                    let modified = modified_time(&path);
                    (path, modified)
                })
                .collect(),
            population_skip_rows: config.population_skip_rows,
            age_skip_rows: config.age_skip_rows,
        }
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// A memoized load
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub dataset: Arc<RawDataset>,
    pub loaded_at: DateTime<Utc>,
}

/// Single-entry cache of the raw dataset
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<CacheEntry>,
    loads: usize,
}

impl DatasetCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the memoized dataset for `config`, loading it when the key changed
    pub fn get_or_load(&mut self, config: &DashboardConfig) -> Arc<RawDataset> {
        let key = CacheKey::for_config(config);

        if let Some(entry) = &self.entry {
            if entry.key == key {
                debug!("Reusing dataset loaded at {}", entry.loaded_at);
                return Arc::clone(&entry.dataset);
            }
            info!("Source paths, timestamps or preamble widths changed, reloading dataset");
        }

        let dataset = Arc::new(load_dataset(config));
        self.loads += 1;
        self.entry = Some(CacheEntry {
            key,
            dataset: Arc::clone(&dataset),
            loaded_at: Utc::now(),
        });
        dataset
    }

    /// Drop the memoized dataset
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            info!("Dataset cache invalidated");
        }
    }

    /// The current entry, if any
    #[must_use]
    pub fn entry(&self) -> Option<&CacheEntry> {
        self.entry.as_ref()
    }

    /// Number of loads performed so far
    #[must_use]
    pub const fn load_count(&self) -> usize {
        self.loads
    }
}
