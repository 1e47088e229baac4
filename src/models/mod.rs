//! Data model of the dashboard core
//!
//! Cleaned population rows, reduced age tables and the derived views handed
//! to the presentation layer.

pub mod age;
pub mod population;
pub mod sample;

pub use age::{AgeRow, CohortRow, PopulationPyramid, ReducedAgeTable};
pub use population::{CleanedPopulation, PopulationRecord, PopulationTable};
pub use sample::sample_population;
