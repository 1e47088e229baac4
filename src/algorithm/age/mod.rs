//! Age-distribution processing
//!
//! Raw age tables are reduced to their national rows; the pyramid and the
//! cohort time series are read from those reductions.

pub mod cohort;
pub mod pyramid;
pub mod reducer;

pub use cohort::cohort_time_series;
pub use pyramid::create_population_pyramid;
pub use reducer::{clean_age_data, clean_age_tables};
