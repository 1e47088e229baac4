//! Canonical table schemas and the positional column mapper.
//!
//! The raw population file carries a multi-line Japanese header that is
//! skipped on load, so columns are named by position against the fixed
//! 24-column schema below.

use std::fmt;

use arrow::datatypes::{DataType, Field, Schema};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod age;
pub mod coerce;

pub use age::{AGE_BRACKET_COUNT, AGE_BRACKET_LABELS, AgeTableLayout, Cohort, Sex, SexLabels};
pub use coerce::{coerce_numeric_array, parse_locale_number};

/// Columns of the population-change table, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationColumn {
    OrganizationCode,
    PrefectureName,
    MalePopulation,
    FemalePopulation,
    TotalPopulation,
    Households,
    InMigrationDomestic,
    InMigrationForeign,
    InMigrationTotal,
    Births,
    OtherIncrease,
    IncreaseTotal,
    OutMigrationDomestic,
    OutMigrationForeign,
    OutMigrationTotal,
    Deaths,
    OtherDecrease,
    DecreaseTotal,
    NetChange,
    NetChangeRate,
    NaturalChange,
    NaturalChangeRate,
    SocialChange,
    SocialChangeRate,
}

/// Number of columns in the canonical population schema
pub const CANONICAL_WIDTH: usize = 24;

impl PopulationColumn {
    /// All columns in positional order
    pub const ALL: [Self; CANONICAL_WIDTH] = [
        Self::OrganizationCode,
        Self::PrefectureName,
        Self::MalePopulation,
        Self::FemalePopulation,
        Self::TotalPopulation,
        Self::Households,
        Self::InMigrationDomestic,
        Self::InMigrationForeign,
        Self::InMigrationTotal,
        Self::Births,
        Self::OtherIncrease,
        Self::IncreaseTotal,
        Self::OutMigrationDomestic,
        Self::OutMigrationForeign,
        Self::OutMigrationTotal,
        Self::Deaths,
        Self::OtherDecrease,
        Self::DecreaseTotal,
        Self::NetChange,
        Self::NetChangeRate,
        Self::NaturalChange,
        Self::NaturalChangeRate,
        Self::SocialChange,
        Self::SocialChangeRate,
    ];

    /// Columns summed per bucket by the region grouping
    pub const REGION_SUM_COLUMNS: [Self; 6] = [
        Self::TotalPopulation,
        Self::Births,
        Self::Deaths,
        Self::NetChange,
        Self::NaturalChange,
        Self::SocialChange,
    ];

    /// Canonical column name as used in the cleaned table
    #[must_use]
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Self::OrganizationCode => "団体コード",
            Self::PrefectureName => "都道府県名",
            Self::MalePopulation => "男性人口",
            Self::FemalePopulation => "女性人口",
            Self::TotalPopulation => "総人口",
            Self::Households => "世帯数",
            Self::InMigrationDomestic => "転入国内",
            Self::InMigrationForeign => "転入国外",
            Self::InMigrationTotal => "転入計",
            Self::Births => "出生数",
            Self::OtherIncrease => "その他増",
            Self::IncreaseTotal => "増加計",
            Self::OutMigrationDomestic => "転出国内",
            Self::OutMigrationForeign => "転出国外",
            Self::OutMigrationTotal => "転出計",
            Self::Deaths => "死亡数",
            Self::OtherDecrease => "その他減",
            Self::DecreaseTotal => "減少計",
            Self::NetChange => "人口増減数",
            Self::NetChangeRate => "人口増減率",
            Self::NaturalChange => "自然増減数",
            Self::NaturalChangeRate => "自然増減率",
            Self::SocialChange => "社会増減数",
            Self::SocialChangeRate => "社会増減率",
        }
    }

    /// Position of the column in the raw file
    #[must_use]
    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or(CANONICAL_WIDTH)
    }

    /// Look a column up by its canonical name
    #[must_use]
    pub fn from_canonical_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.canonical_name() == name)
    }

    /// Whether the cleaner converts this column to numbers
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::OrganizationCode | Self::PrefectureName)
    }

    /// Change and rate columns may legitimately be negative; counts may not
    #[must_use]
    pub const fn allows_negative(self) -> bool {
        matches!(
            self,
            Self::NetChange
                | Self::NetChangeRate
                | Self::NaturalChange
                | Self::NaturalChangeRate
                | Self::SocialChange
                | Self::SocialChangeRate
        )
    }

    /// Arrow type of the column after cleaning
    #[must_use]
    pub fn data_type(self) -> DataType {
        if self.is_numeric() {
            DataType::Float64
        } else {
            DataType::Utf8
        }
    }
}

impl fmt::Display for PopulationColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Result of mapping raw positional columns onto the canonical schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Canonical columns assigned to the first `columns.len()` raw columns
    pub columns: Vec<PopulationColumn>,
    /// Raw columns beyond the canonical width that were dropped
    pub dropped: usize,
}

/// Assign canonical names by position.
///
/// The mapping covers `min(raw_width, 24)` columns. Extra raw columns are
/// reported in `dropped`. A table too narrow to carry the prefecture-name
/// column fails with [`Error::Schema`].
pub fn map_columns(raw_width: usize) -> Result<ColumnMapping> {
    let width = raw_width.min(CANONICAL_WIDTH);
    let required = PopulationColumn::PrefectureName.position();
    if width <= required {
        return Err(Error::schema(
            "population",
            format!(
                "column '{}' missing: table has {raw_width} column(s), at least {} required",
                PopulationColumn::PrefectureName,
                required + 1
            ),
        ));
    }

    Ok(ColumnMapping {
        columns: PopulationColumn::ALL[..width].to_vec(),
        dropped: raw_width - width,
    })
}

/// Arrow schema of a cleaned population table carrying the given columns
#[must_use]
pub fn cleaned_schema(columns: &[PopulationColumn]) -> Schema {
    Schema::new(
        columns
            .iter()
            .map(|c| Field::new(c.canonical_name(), c.data_type(), true))
            .collect::<Vec<_>>(),
    )
}

/// Positional name for a raw column
#[must_use]
pub fn raw_column_name(index: usize) -> String {
    format!("column_{index}")
}

/// Arrow schema of a raw table: every column is nullable `Utf8`
#[must_use]
pub fn raw_schema(width: usize) -> Schema {
    Schema::new(
        (0..width)
            .map(|i| Field::new(raw_column_name(i), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    )
}
