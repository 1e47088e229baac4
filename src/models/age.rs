//! Reduced age-distribution tables and the views derived from them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::{AGE_BRACKET_COUNT, AGE_BRACKET_LABELS, Cohort, Sex};

/// National age distribution of one sex
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeRow {
    pub sex: Sex,
    /// All-ages total as printed in the file
    pub total: Option<f64>,
    /// One value per age bracket, always [`AGE_BRACKET_COUNT`] long
    pub brackets: Vec<Option<f64>>,
}

impl AgeRow {
    /// Sum of the brackets in `cohort`, missing values contributing zero
    #[must_use]
    pub fn cohort_sum(&self, cohort: Cohort) -> f64 {
        self.brackets[cohort.brackets()]
            .iter()
            .map(|v| v.unwrap_or(0.0))
            .sum()
    }

    /// Bracket values with missing entries read as zero
    #[must_use]
    pub fn bracket_values(&self) -> Vec<f64> {
        self.brackets.iter().map(|v| v.unwrap_or(0.0)).collect()
    }
}

/// National rows of one year's age-distribution table, keyed by sex
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReducedAgeTable {
    pub year: u16,
    pub rows: BTreeMap<Sex, AgeRow>,
}

impl ReducedAgeTable {
    #[must_use]
    pub const fn empty(year: u16) -> Self {
        Self {
            year,
            rows: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn row(&self, sex: Sex) -> Option<&AgeRow> {
        self.rows.get(&sex)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Male and female counts aligned to the age brackets of one year.
///
/// Values are unsigned; a renderer negates the male side if it wants the
/// classic back-to-back layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationPyramid {
    pub year: u16,
    pub labels: [&'static str; AGE_BRACKET_COUNT],
    pub male: Vec<f64>,
    pub female: Vec<f64>,
}

impl PopulationPyramid {
    /// `(label, male, female)` per bracket
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64, f64)> + '_ {
        self.labels
            .iter()
            .zip(self.male.iter().zip(&self.female))
            .map(|(label, (m, f))| (*label, *m, *f))
    }

    #[must_use]
    pub fn labels() -> [&'static str; AGE_BRACKET_COUNT] {
        AGE_BRACKET_LABELS
    }
}

/// Cohort totals of one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CohortRow {
    pub year: u16,
    pub child: f64,
    pub working_age: f64,
    pub elderly: f64,
}

impl CohortRow {
    #[must_use]
    pub const fn get(&self, cohort: Cohort) -> f64 {
        match cohort {
            Cohort::Child => self.child,
            Cohort::WorkingAge => self.working_age,
            Cohort::Elderly => self.elderly,
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.child + self.working_age + self.elderly
    }

    /// Share of the elderly cohort in percent; `None` for an empty year
    #[must_use]
    pub fn aging_rate(&self) -> Option<f64> {
        let total = self.total();
        (total > 0.0).then(|| self.elderly / total * 100.0)
    }
}
