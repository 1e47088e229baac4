//! Algorithm implementations for the dashboard views
//!
//! Cleaning and aggregation of the population-change table, and reduction
//! of the age-distribution tables into pyramids and cohort series.

pub mod age;
pub mod population;
