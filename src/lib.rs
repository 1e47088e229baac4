//! A Rust library for loading, cleaning and aggregating Japanese prefecture
//! population statistics for dashboard views.

pub mod algorithm;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod models;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use cache::DatasetCache;
pub use config::DashboardConfig;
pub use dashboard::{DashboardView, PopulationOrigin, build_dashboard};
pub use error::{Error, Result, ValueCoercionWarning};
pub use loader::{DataStatus, RawDataset, SourceStatus, load_dataset, read_raw_csv};
pub use schema::{Cohort, PopulationColumn, Sex};

// Data model
pub use models::{
    CleanedPopulation, CohortRow, PopulationPyramid, PopulationRecord, PopulationTable,
    ReducedAgeTable, sample_population,
};

// Cleaning and aggregation
pub use algorithm::age::{
    clean_age_data, clean_age_tables, cohort_time_series, create_population_pyramid,
};
pub use algorithm::population::{
    NationalSummary, RegionClassification, RegionSummary, bottom_n, change_rate_rankings,
    clean_population_data, group_by_region, top_n,
};

// Arrow types
pub use arrow::record_batch::RecordBatch;
