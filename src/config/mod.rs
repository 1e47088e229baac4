//! Configuration for locating and interpreting the statistics files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::error::util::safe_open_file;
use crate::schema::AgeTableLayout;

/// Placeholder replaced by the year in [`DashboardConfig::age_file_pattern`]
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// Configuration for the dashboard data sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Root directory the relative file paths are resolved against
    pub data_dir: PathBuf,
    /// Population-change file, relative to `data_dir`
    pub population_file: PathBuf,
    /// Preamble rows before the header row of the population file
    pub population_skip_rows: usize,
    /// Age-distribution file pattern, relative to `data_dir`
    pub age_file_pattern: String,
    /// Years for which an age-distribution file is expected
    pub age_years: Vec<u16>,
    /// Preamble rows before the header row of each age file
    pub age_skip_rows: usize,
    /// Prefecture-name literal of the grand-total row
    pub total_sentinel: String,
    /// Row count of the ranking views
    pub top_n: usize,
    /// Column layout of the age-distribution files
    pub age_layout: AgeTableLayout,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("人口動態"),
            population_file: PathBuf::from("population_included/2024_population.csv"),
            population_skip_rows: 5,
            age_file_pattern: format!(
                "prefecture_population_age/{YEAR_PLACEHOLDER}_population_age.csv"
            ),
            age_years: vec![2022, 2023, 2024],
            age_skip_rows: 2,
            total_sentinel: "合計".to_string(),
            top_n: 10,
            age_layout: AgeTableLayout::default(),
        }
    }
}

impl DashboardConfig {
    /// Default configuration rooted at another data directory
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "configuration")?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }

    /// Full path of the population-change file
    #[must_use]
    pub fn resolved_population_path(&self) -> PathBuf {
        self.data_dir.join(&self.population_file)
    }

    /// Full path of the age-distribution file for one year
    #[must_use]
    pub fn resolved_age_path(&self, year: u16) -> PathBuf {
        self.data_dir.join(
            self.age_file_pattern
                .replace(YEAR_PLACEHOLDER, &year.to_string()),
        )
    }

    /// Full paths of all configured age-distribution files, keyed by year
    #[must_use]
    pub fn resolved_age_paths(&self) -> BTreeMap<u16, PathBuf> {
        self.age_years
            .iter()
            .map(|&year| (year, self.resolved_age_path(year)))
            .collect()
    }

    /// Every path the loader reads, population file first
    #[must_use]
    pub fn resolved_paths(&self) -> Vec<PathBuf> {
        std::iter::once(self.resolved_population_path())
            .chain(self.resolved_age_paths().into_values())
            .collect()
    }
}
