//! Population-change table processing
//!
//! Cleaning of the raw table and the aggregate views built on the cleaned
//! rows: rankings, region sums and national headline figures.

pub mod cleaner;
pub mod ranking;
pub mod region;
pub mod statistics;

// Re-export commonly used items
pub use cleaner::clean_population_data;
pub use ranking::{
    ChangeRateRankings, ChangeRateRow, RankOrder, bottom_n, change_rate_rankings, rank_records,
    top_n,
};
pub use region::{RegionClassification, RegionSummary, group_by_region, group_records_by_region};
pub use statistics::{NationalSummary, PopulationStatistics};
