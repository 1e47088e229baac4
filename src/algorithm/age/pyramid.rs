//! Population pyramid for one year.

use log::info;

use crate::models::{PopulationPyramid, ReducedAgeTable};
use crate::schema::{AGE_BRACKET_LABELS, Sex};

/// Male and female bracket counts of one reduced year.
///
/// Returns `None` unless both a male and a female national row exist;
/// a pyramid is never built from one side. Missing bracket values read
/// as zero.
#[must_use]
pub fn create_population_pyramid(table: &ReducedAgeTable) -> Option<PopulationPyramid> {
    let (Some(male), Some(female)) = (table.row(Sex::Male), table.row(Sex::Female)) else {
        info!(
            "{} age data has no male/female pair, pyramid unavailable",
            table.year
        );
        return None;
    };

    Some(PopulationPyramid {
        year: table.year,
        labels: AGE_BRACKET_LABELS,
        male: male.bracket_values(),
        female: female.bracket_values(),
    })
}
