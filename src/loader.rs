//! CSV loading of the raw statistics files
//!
//! Each source is read into a `RecordBatch` of nullable `Utf8` columns named
//! by position. A source that cannot be read is recorded as unavailable in
//! [`DataStatus`]; it never aborts loading of the others.

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{ArrayRef, StringBuilder};
use arrow::record_batch::RecordBatch;
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::error::util::{safe_open_file, validate_directory};
use crate::error::{Error, Result};
use crate::schema::raw_schema;
use crate::utils::logging::{log_source_loaded, log_source_start, log_unavailable};

/// Name of the population-change source in status messages
pub const POPULATION_SOURCE: &str = "population";

/// Availability of one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceStatus {
    /// Human-readable source name, e.g. `2023 age data`
    pub name: String,
    pub path: PathBuf,
    pub available: bool,
    /// Data rows read (0 when unavailable)
    pub rows: usize,
    /// Cause of unavailability
    pub reason: Option<String>,
}

impl SourceStatus {
    fn available(name: String, path: PathBuf, rows: usize) -> Self {
        Self {
            name,
            path,
            available: true,
            rows,
            reason: None,
        }
    }

    fn unavailable(name: String, path: PathBuf, err: &Error) -> Self {
        let reason = match err {
            Error::SourceUnavailable { reason, .. } => reason.clone(),
            other => other.to_string(),
        };
        Self {
            name,
            path,
            available: false,
            rows: 0,
            reason: Some(reason),
        }
    }

    /// One-line message suitable for a status panel
    #[must_use]
    pub fn message(&self) -> String {
        match (&self.reason, self.available) {
            (_, true) => format!("{} available ({} rows)", self.name, self.rows),
            (Some(reason), false) => format!("{} unavailable: {reason}", self.name),
            (None, false) => format!("{} unavailable", self.name),
        }
    }
}

/// Per-source availability of a load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataStatus {
    pub population: SourceStatus,
    pub age: BTreeMap<u16, SourceStatus>,
}

impl DataStatus {
    /// Availability flag per age-distribution year
    #[must_use]
    pub fn age_availability(&self) -> BTreeMap<u16, bool> {
        self.age
            .iter()
            .map(|(year, status)| (*year, status.available))
            .collect()
    }

    /// Whether every configured source was read
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.population.available && self.age.values().all(|s| s.available)
    }

    /// Status lines for every source, population first
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        std::iter::once(&self.population)
            .chain(self.age.values())
            .map(SourceStatus::message)
            .collect()
    }

    /// Status lines for the unavailable sources only
    #[must_use]
    pub fn unavailable_messages(&self) -> Vec<String> {
        std::iter::once(&self.population)
            .chain(self.age.values())
            .filter(|s| !s.available)
            .map(SourceStatus::message)
            .collect()
    }
}

/// Raw tables of one load, plus their availability
#[derive(Debug, Clone)]
pub struct RawDataset {
    /// Raw population-change table, if it could be read
    pub population: Option<RecordBatch>,
    /// Raw age-distribution tables keyed by year; unreadable years are absent
    pub age: BTreeMap<u16, RecordBatch>,
    pub status: DataStatus,
}

/// Name of the age-distribution source of one year
#[must_use]
pub fn age_source_name(year: u16) -> String {
    format!("{year} age data")
}

/// Read a CSV file into a raw all-`Utf8` record batch.
///
/// The first `skip_rows` physical lines are preamble and are discarded,
/// blank lines included. The next record is the header: it is not kept,
/// but its width fixes the number of columns. Shorter data rows are padded
/// with nulls and longer ones truncated. Empty cells read as null.
pub fn read_raw_csv(path: &Path, skip_rows: usize, source: &str) -> Result<RecordBatch> {
    let file = safe_open_file(path, source)?;
    let mut input = BufReader::new(file);
    let no_header = || {
        Error::unavailable(
            source,
            format!(
                "no header row after {skip_rows} preamble row(s): {}",
                path.display()
            ),
        )
    };

    let mut line = Vec::new();
    for _ in 0..skip_rows {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            return Err(no_header());
        }
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut records = reader.records();
    let header = records.next().ok_or_else(no_header)??;

    let width = header.len();
    let mut builders: Vec<StringBuilder> = (0..width).map(|_| StringBuilder::new()).collect();
    let mut rows = 0usize;

    for record in records {
        let record = record?;
        if record.len() > width {
            log::debug!(
                "{source}: row {rows} has {} fields, truncating to {width}",
                record.len()
            );
        }
        for (i, builder) in builders.iter_mut().enumerate() {
            match record.get(i) {
                Some(value) if !value.trim().is_empty() => builder.append_value(value),
                _ => builder.append_null(),
            }
        }
        rows += 1;
    }

    let columns: Vec<ArrayRef> = builders
        .iter_mut()
        .map(|b| Arc::new(b.finish()) as ArrayRef)
        .collect();

    Ok(RecordBatch::try_new(Arc::new(raw_schema(width)), columns)?)
}

/// Read one source, converting any failure into an unavailable status
fn load_source(
    name: String,
    path: PathBuf,
    skip_rows: usize,
) -> (Option<RecordBatch>, SourceStatus) {
    log_source_start(&name, &path);
    let start = Instant::now();

    match read_raw_csv(&path, skip_rows, &name) {
        Ok(batch) => {
            log_source_loaded(&name, &path, batch.num_rows(), Some(start.elapsed()));
            let status = SourceStatus::available(name, path, batch.num_rows());
            (Some(batch), status)
        }
        Err(err) => {
            log_unavailable(&err.to_string(), Some(&path));
            let status = SourceStatus::unavailable(name, path, &err);
            (None, status)
        }
    }
}

/// Load every configured source.
///
/// This never fails: unreadable files are reported through
/// [`RawDataset::status`].
#[must_use]
pub fn load_dataset(config: &DashboardConfig) -> RawDataset {
    if let Err(err) = validate_directory(&config.data_dir, "data directory") {
        log_unavailable(&err.to_string(), Some(&config.data_dir));
    }

    let (population, population_status) = load_source(
        POPULATION_SOURCE.to_string(),
        config.resolved_population_path(),
        config.population_skip_rows,
    );

    let mut age = BTreeMap::new();
    let mut age_status = BTreeMap::new();
    for (year, path) in config.resolved_age_paths() {
        let (batch, status) = load_source(age_source_name(year), path, config.age_skip_rows);
        if let Some(batch) = batch {
            age.insert(year, batch);
        }
        age_status.insert(year, status);
    }

    RawDataset {
        population,
        age,
        status: DataStatus {
            population: population_status,
            age: age_status,
        },
    }
}
