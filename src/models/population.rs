//! Cleaned population table and its typed rows.

use arrow::record_batch::RecordBatch;
use serde::Serialize;

use crate::error::{Error, Result, ValueCoercionWarning};
use crate::schema::PopulationColumn;
use crate::utils::arrow::{extract_float64, extract_float64_column, extract_string};

/// One prefecture of the population-change table.
///
/// Numeric fields are `None` when the value was missing, failed to parse,
/// or the column was absent from a narrow source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PopulationRecord {
    pub code: Option<String>,
    pub name: String,
    pub male_population: Option<f64>,
    pub female_population: Option<f64>,
    pub total_population: Option<f64>,
    pub households: Option<f64>,
    pub in_migration_domestic: Option<f64>,
    pub in_migration_foreign: Option<f64>,
    pub in_migration_total: Option<f64>,
    pub births: Option<f64>,
    pub other_increase: Option<f64>,
    pub increase_total: Option<f64>,
    pub out_migration_domestic: Option<f64>,
    pub out_migration_foreign: Option<f64>,
    pub out_migration_total: Option<f64>,
    pub deaths: Option<f64>,
    pub other_decrease: Option<f64>,
    pub decrease_total: Option<f64>,
    pub net_change: Option<f64>,
    pub net_change_rate: Option<f64>,
    pub natural_change: Option<f64>,
    pub natural_change_rate: Option<f64>,
    pub social_change: Option<f64>,
    pub social_change_rate: Option<f64>,
}

impl PopulationRecord {
    /// Record with only the prefecture name set
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Numeric value of a column; `None` for the two text columns
    #[must_use]
    pub const fn value(&self, column: PopulationColumn) -> Option<f64> {
        match column {
            PopulationColumn::OrganizationCode | PopulationColumn::PrefectureName => None,
            PopulationColumn::MalePopulation => self.male_population,
            PopulationColumn::FemalePopulation => self.female_population,
            PopulationColumn::TotalPopulation => self.total_population,
            PopulationColumn::Households => self.households,
            PopulationColumn::InMigrationDomestic => self.in_migration_domestic,
            PopulationColumn::InMigrationForeign => self.in_migration_foreign,
            PopulationColumn::InMigrationTotal => self.in_migration_total,
            PopulationColumn::Births => self.births,
            PopulationColumn::OtherIncrease => self.other_increase,
            PopulationColumn::IncreaseTotal => self.increase_total,
            PopulationColumn::OutMigrationDomestic => self.out_migration_domestic,
            PopulationColumn::OutMigrationForeign => self.out_migration_foreign,
            PopulationColumn::OutMigrationTotal => self.out_migration_total,
            PopulationColumn::Deaths => self.deaths,
            PopulationColumn::OtherDecrease => self.other_decrease,
            PopulationColumn::DecreaseTotal => self.decrease_total,
            PopulationColumn::NetChange => self.net_change,
            PopulationColumn::NetChangeRate => self.net_change_rate,
            PopulationColumn::NaturalChange => self.natural_change,
            PopulationColumn::NaturalChangeRate => self.natural_change_rate,
            PopulationColumn::SocialChange => self.social_change,
            PopulationColumn::SocialChangeRate => self.social_change_rate,
        }
    }

    /// Mutable slot of a numeric column
    pub fn value_mut(&mut self, column: PopulationColumn) -> Option<&mut Option<f64>> {
        let slot = match column {
            PopulationColumn::OrganizationCode | PopulationColumn::PrefectureName => return None,
            PopulationColumn::MalePopulation => &mut self.male_population,
            PopulationColumn::FemalePopulation => &mut self.female_population,
            PopulationColumn::TotalPopulation => &mut self.total_population,
            PopulationColumn::Households => &mut self.households,
            PopulationColumn::InMigrationDomestic => &mut self.in_migration_domestic,
            PopulationColumn::InMigrationForeign => &mut self.in_migration_foreign,
            PopulationColumn::InMigrationTotal => &mut self.in_migration_total,
            PopulationColumn::Births => &mut self.births,
            PopulationColumn::OtherIncrease => &mut self.other_increase,
            PopulationColumn::IncreaseTotal => &mut self.increase_total,
            PopulationColumn::OutMigrationDomestic => &mut self.out_migration_domestic,
            PopulationColumn::OutMigrationForeign => &mut self.out_migration_foreign,
            PopulationColumn::OutMigrationTotal => &mut self.out_migration_total,
            PopulationColumn::Deaths => &mut self.deaths,
            PopulationColumn::OtherDecrease => &mut self.other_decrease,
            PopulationColumn::DecreaseTotal => &mut self.decrease_total,
            PopulationColumn::NetChange => &mut self.net_change,
            PopulationColumn::NetChangeRate => &mut self.net_change_rate,
            PopulationColumn::NaturalChange => &mut self.natural_change,
            PopulationColumn::NaturalChangeRate => &mut self.natural_change_rate,
            PopulationColumn::SocialChange => &mut self.social_change,
            PopulationColumn::SocialChangeRate => &mut self.social_change_rate,
        };
        Some(slot)
    }

    /// Read one row of a cleaned table
    pub fn from_batch_row(batch: &RecordBatch, row: usize) -> Result<Self> {
        let name = extract_string(
            batch,
            row,
            PopulationColumn::PrefectureName.canonical_name(),
            true,
        )?
        .unwrap_or_default();

        let mut record = Self {
            code: extract_string(
                batch,
                row,
                PopulationColumn::OrganizationCode.canonical_name(),
                false,
            )?,
            name,
            ..Self::default()
        };

        for column in PopulationColumn::ALL.into_iter().filter(|c| c.is_numeric()) {
            let value = extract_float64(batch, row, column.canonical_name(), false)?;
            if let Some(slot) = record.value_mut(column) {
                *slot = value;
            }
        }

        Ok(record)
    }
}

/// Cleaned population table: one row per prefecture, canonical column names
#[derive(Debug, Clone)]
pub struct PopulationTable {
    batch: RecordBatch,
    columns: Vec<PopulationColumn>,
}

impl PopulationTable {
    /// Wrap a cleaned batch whose fields follow `columns`
    pub fn new(batch: RecordBatch, columns: Vec<PopulationColumn>) -> Result<Self> {
        if batch.num_columns() != columns.len() {
            return Err(Error::schema(
                "population",
                format!(
                    "batch has {} columns but {} canonical columns were given",
                    batch.num_columns(),
                    columns.len()
                ),
            ));
        }
        if !columns.contains(&PopulationColumn::PrefectureName) {
            return Err(Error::schema(
                "population",
                format!("column '{}' missing", PopulationColumn::PrefectureName),
            ));
        }
        Ok(Self { batch, columns })
    }

    /// Underlying Arrow batch
    #[must_use]
    pub const fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Canonical columns carried by the table
    #[must_use]
    pub fn columns(&self) -> &[PopulationColumn] {
        &self.columns
    }

    #[must_use]
    pub fn has_column(&self, column: PopulationColumn) -> bool {
        self.columns.contains(&column)
    }

    /// Fail with [`Error::ColumnNotFound`] unless the column is present
    pub fn require_column(&self, column: PopulationColumn) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(Error::ColumnNotFound {
                column: column.canonical_name().to_string(),
            })
        }
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// Values of one numeric column; `None` if the column is absent
    pub fn column_values(&self, column: PopulationColumn) -> Result<Option<Vec<Option<f64>>>> {
        if !column.is_numeric() || !self.has_column(column) {
            return Ok(None);
        }
        extract_float64_column(&self.batch, column.canonical_name(), false)
    }

    /// Typed view of every row
    pub fn records(&self) -> Result<Vec<PopulationRecord>> {
        (0..self.batch.num_rows())
            .map(|row| PopulationRecord::from_batch_row(&self.batch, row))
            .collect()
    }
}

/// Output of the population cleaner
#[derive(Debug, Clone)]
pub struct CleanedPopulation {
    pub table: PopulationTable,
    /// Values replaced by missing during numeric coercion
    pub warnings: Vec<ValueCoercionWarning>,
    /// Raw columns beyond the canonical schema that were dropped
    pub dropped_columns: usize,
    /// Number of grand-total rows removed
    pub removed_total_rows: usize,
    /// Prefectures with more than one row; every row is kept
    pub duplicate_prefectures: Vec<String>,
}
