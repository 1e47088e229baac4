//! Child / working-age / elderly totals per year.

use std::collections::BTreeMap;

use log::debug;

use crate::models::{CohortRow, ReducedAgeTable};
use crate::schema::{Cohort, Sex};

/// Cohort totals of every year that has a national both-sexes row.
///
/// Years without that row are omitted rather than zero-filled. Missing
/// bracket values contribute zero to their cohort.
#[must_use]
pub fn cohort_time_series(tables: &BTreeMap<u16, ReducedAgeTable>) -> Vec<CohortRow> {
    tables
        .values()
        .filter_map(|table| {
            let Some(both) = table.row(Sex::Both) else {
                debug!("{} omitted from cohort series: no both-sexes row", table.year);
                return None;
            };
            Some(CohortRow {
                year: table.year,
                child: both.cohort_sum(Cohort::Child),
                working_age: both.cohort_sum(Cohort::WorkingAge),
                elderly: both.cohort_sum(Cohort::Elderly),
            })
        })
        .collect()
}
