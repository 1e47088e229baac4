//! National headline figures of a cleaned population table.

use serde::Serialize;

use crate::error::Result;
use crate::models::PopulationTable;
use crate::schema::PopulationColumn;

/// Headline metrics shown above the rankings
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NationalSummary {
    /// Sum of total population
    pub total_population: Option<f64>,
    /// Mean net-change rate across prefectures
    pub mean_change_rate: Option<f64>,
    /// Sum of natural change (births minus deaths)
    pub natural_change: Option<f64>,
    /// Sum of social change (in-migration minus out-migration)
    pub social_change: Option<f64>,
    /// Prefectures contributing to the table
    pub prefectures: usize,
}

/// Functions for population statistics and summaries
pub struct PopulationStatistics;

impl PopulationStatistics {
    /// Sum of the present values; `None` when the column is absent or all missing
    pub fn sum(table: &PopulationTable, column: PopulationColumn) -> Result<Option<f64>> {
        Ok(table.column_values(column)?.and_then(|values| {
            let present: Vec<f64> = values.into_iter().flatten().collect();
            (!present.is_empty()).then(|| present.iter().sum())
        }))
    }

    /// Mean of the present values; `None` when the column is absent or all missing
    pub fn mean(table: &PopulationTable, column: PopulationColumn) -> Result<Option<f64>> {
        Ok(table.column_values(column)?.and_then(|values| {
            let present: Vec<f64> = values.into_iter().flatten().collect();
            (!present.is_empty()).then(|| present.iter().sum::<f64>() / present.len() as f64)
        }))
    }

    /// Headline metrics of the table
    pub fn national_summary(table: &PopulationTable) -> Result<NationalSummary> {
        Ok(NationalSummary {
            total_population: Self::sum(table, PopulationColumn::TotalPopulation)?,
            mean_change_rate: Self::mean(table, PopulationColumn::NetChangeRate)?,
            natural_change: Self::sum(table, PopulationColumn::NaturalChange)?,
            social_change: Self::sum(table, PopulationColumn::SocialChange)?,
            prefectures: table.num_rows(),
        })
    }
}
