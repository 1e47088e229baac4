//! Assembly of every dashboard view from one raw load.
//!
//! [`DashboardView`] is the plain structured data handed to a renderer:
//! no presentation strings beyond the status messages are produced here.

use std::collections::BTreeMap;

use log::{info, warn};
use serde::Serialize;

use crate::algorithm::age::{clean_age_tables, cohort_time_series, create_population_pyramid};
use crate::algorithm::population::{
    ChangeRateRankings, NationalSummary, PopulationStatistics, RegionClassification,
    RegionSummary, change_rate_rankings, clean_population_data, group_by_region,
};
use crate::config::DashboardConfig;
use crate::error::{Result, ValueCoercionWarning};
use crate::loader::{DataStatus, RawDataset};
use crate::models::{CohortRow, PopulationPyramid, PopulationRecord, ReducedAgeTable, sample_population};
use crate::schema::PopulationColumn;

/// Seed of the sample table substituted for a missing population source
pub const SAMPLE_SEED: u64 = 2024;

/// Where the population rows came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationOrigin {
    /// Cleaned from the population-change file
    Source,
    /// Synthetic sample, the source was unavailable
    Sample,
}

/// Everything a renderer needs for one dashboard pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub status: DataStatus,
    pub origin: PopulationOrigin,
    pub records: Vec<PopulationRecord>,
    pub warnings: Vec<ValueCoercionWarning>,
    /// Prefectures that appear on more than one row
    pub duplicate_prefectures: Vec<String>,
    pub summary: NationalSummary,
    /// Present when the table carries the net-change-rate column
    pub rankings: Option<ChangeRateRankings>,
    pub metro: Vec<RegionSummary>,
    pub areas: Vec<RegionSummary>,
    pub age: BTreeMap<u16, ReducedAgeTable>,
    /// Pyramid of the latest year that has both a male and a female row
    pub pyramid: Option<PopulationPyramid>,
    pub cohorts: Vec<CohortRow>,
}

/// Build every view from a raw load.
///
/// A missing population file is replaced by the sample table. A population
/// file that cannot be cleaned fails with the cleaner's schema error.
pub fn build_dashboard(dataset: &RawDataset, config: &DashboardConfig) -> Result<DashboardView> {
    let (table, warnings, duplicate_prefectures, origin) = match &dataset.population {
        Some(raw) => {
            let cleaned = clean_population_data(raw, &config.total_sentinel)?;
            (
                cleaned.table,
                cleaned.warnings,
                cleaned.duplicate_prefectures,
                PopulationOrigin::Source,
            )
        }
        None => {
            warn!("Population data unavailable, using sample data");
            (
                sample_population(SAMPLE_SEED)?,
                Vec::new(),
                Vec::new(),
                PopulationOrigin::Sample,
            )
        }
    };

    let rankings = if table.has_column(PopulationColumn::NetChangeRate) {
        Some(change_rate_rankings(&table, config.top_n)?)
    } else {
        None
    };

    let age = clean_age_tables(&dataset.age, &config.age_layout);
    let pyramid = age.values().rev().find_map(create_population_pyramid);
    let cohorts = cohort_time_series(&age);

    for message in dataset.status.unavailable_messages() {
        info!("{message}");
    }

    Ok(DashboardView {
        status: dataset.status.clone(),
        origin,
        summary: PopulationStatistics::national_summary(&table)?,
        records: table.records()?,
        warnings,
        duplicate_prefectures,
        rankings,
        metro: group_by_region(&table, &RegionClassification::metro())?,
        areas: group_by_region(&table, &RegionClassification::areas())?,
        age,
        pyramid,
        cohorts,
    })
}
