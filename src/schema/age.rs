//! Layout of the age-distribution tables.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Number of five-year age brackets (0-4 up to 95-99, then 100+)
pub const AGE_BRACKET_COUNT: usize = 21;

/// Bracket labels in column order
pub const AGE_BRACKET_LABELS: [&str; AGE_BRACKET_COUNT] = [
    "0-4", "5-9", "10-14", "15-19", "20-24", "25-29", "30-34", "35-39", "40-44", "45-49", "50-54",
    "55-59", "60-64", "65-69", "70-74", "75-79", "80-84", "85-89", "90-94", "95-99", "100+",
];

/// Sex code of an age-distribution row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    /// Both sexes combined
    Both,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("male"),
            Self::Female => f.write_str("female"),
            Self::Both => f.write_str("both"),
        }
    }
}

/// Literal sex codes accepted for each [`Sex`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SexLabels {
    pub male: Vec<String>,
    pub female: Vec<String>,
    pub both: Vec<String>,
}

impl Default for SexLabels {
    fn default() -> Self {
        Self {
            male: vec!["男".into(), "男性".into(), "male".into()],
            female: vec!["女".into(), "女性".into(), "female".into()],
            both: vec![
                "計".into(),
                "総数".into(),
                "男女計".into(),
                "total".into(),
            ],
        }
    }
}

impl SexLabels {
    /// Resolve a raw sex code, ignoring surrounding whitespace and ASCII case
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<Sex> {
        let code = raw.trim();
        let matches = |labels: &[String]| labels.iter().any(|l| l.eq_ignore_ascii_case(code));
        if matches(&self.both) {
            Some(Sex::Both)
        } else if matches(&self.male) {
            Some(Sex::Male)
        } else if matches(&self.female) {
            Some(Sex::Female)
        } else {
            None
        }
    }
}

/// Positions of the relevant columns in a raw age-distribution table (0-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeTableLayout {
    /// Column holding the prefecture name
    pub prefecture_column: usize,
    /// Column holding the sex code
    pub sex_column: usize,
    /// Column holding the all-ages total, if the file carries one
    pub total_column: Option<usize>,
    /// First age-bracket column; the following 20 columns hold the rest
    pub first_bracket_column: usize,
    /// Prefecture-column values that mark the national total row
    pub national_labels: Vec<String>,
    pub sex_labels: SexLabels,
}

impl Default for AgeTableLayout {
    fn default() -> Self {
        Self {
            prefecture_column: 1,
            sex_column: 2,
            total_column: Some(3),
            first_bracket_column: 4,
            national_labels: vec!["合計".into(), "全国".into()],
            sex_labels: SexLabels::default(),
        }
    }
}

impl AgeTableLayout {
    /// Whether a prefecture-column value marks the national total
    #[must_use]
    pub fn is_national(&self, raw: &str) -> bool {
        let name = raw.trim();
        self.national_labels.iter().any(|l| l == name)
    }
}

/// Coarse age cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    /// 0-14
    Child,
    /// 15-64
    WorkingAge,
    /// 65 and over
    Elderly,
}

impl Cohort {
    pub const ALL: [Self; 3] = [Self::Child, Self::WorkingAge, Self::Elderly];

    /// Bracket indices covered by the cohort
    #[must_use]
    pub const fn brackets(self) -> RangeInclusive<usize> {
        match self {
            Self::Child => 0..=2,
            Self::WorkingAge => 3..=12,
            Self::Elderly => 13..=20,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Child => "年少人口(0-14歳)",
            Self::WorkingAge => "生産年齢人口(15-64歳)",
            Self::Elderly => "老年人口(65歳以上)",
        }
    }
}
