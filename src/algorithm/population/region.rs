//! Grouped sums by a caller-supplied region classification.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::Result;
use crate::models::{PopulationRecord, PopulationTable};
use crate::schema::PopulationColumn;

const TOKYO_AREA: [&str; 4] = ["東京都", "神奈川県", "埼玉県", "千葉県"];
const NAGOYA_AREA: [&str; 3] = ["愛知県", "岐阜県", "三重県"];
const OSAKA_AREA: [&str; 4] = ["大阪府", "京都府", "兵庫県", "奈良県"];

const AREAS: [(&str, &[&str]); 8] = [
    ("北海道", &["北海道"]),
    (
        "東北",
        &["青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県"],
    ),
    (
        "関東",
        &["茨城県", "栃木県", "群馬県", "埼玉県", "千葉県", "東京都", "神奈川県"],
    ),
    (
        "中部",
        &[
            "新潟県", "富山県", "石川県", "福井県", "山梨県", "長野県", "岐阜県", "静岡県",
            "愛知県", "三重県",
        ],
    ),
    (
        "関西",
        &["滋賀県", "京都府", "大阪府", "兵庫県", "奈良県", "和歌山県"],
    ),
    ("中国", &["鳥取県", "島根県", "岡山県", "広島県", "山口県"]),
    ("四国", &["徳島県", "香川県", "愛媛県", "高知県"]),
    (
        "九州",
        &[
            "福岡県", "佐賀県", "長崎県", "熊本県", "大分県", "宮崎県", "鹿児島県", "沖縄県",
        ],
    ),
];

/// Partition of prefecture names into named buckets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionClassification {
    buckets: FxHashMap<String, String>,
    default_bucket: String,
}

impl RegionClassification {
    /// Empty classification: every prefecture falls into `default_bucket`
    pub fn new(default_bucket: impl Into<String>) -> Self {
        Self {
            buckets: FxHashMap::default(),
            default_bucket: default_bucket.into(),
        }
    }

    /// Assign a prefecture to a bucket
    #[must_use]
    pub fn with(mut self, prefecture: impl Into<String>, bucket: impl Into<String>) -> Self {
        self.buckets.insert(prefecture.into(), bucket.into());
        self
    }

    /// Assign several prefectures to one bucket
    #[must_use]
    pub fn with_all<'a>(
        mut self,
        prefectures: impl IntoIterator<Item = &'a str>,
        bucket: &str,
    ) -> Self {
        for prefecture in prefectures {
            self.buckets.insert(prefecture.to_string(), bucket.to_string());
        }
        self
    }

    /// The three major metropolitan areas against the rest of the country
    #[must_use]
    pub fn metro() -> Self {
        Self::new("その他")
            .with_all(TOKYO_AREA, "三大都市圏")
            .with_all(NAGOYA_AREA, "三大都市圏")
            .with_all(OSAKA_AREA, "三大都市圏")
    }

    /// The eight traditional areas (北海道 through 九州)
    #[must_use]
    pub fn areas() -> Self {
        AREAS
            .iter()
            .fold(Self::new("不明"), |c, (area, prefs)| {
                c.with_all(prefs.iter().copied(), area)
            })
    }

    #[must_use]
    pub fn default_bucket(&self) -> &str {
        &self.default_bucket
    }

    /// Bucket of a prefecture.
    ///
    /// Matches the exact name first, then the name without its 都/府/県
    /// suffix, so both "東京都" and "東京" resolve.
    #[must_use]
    pub fn classify(&self, prefecture: &str) -> &str {
        let name = prefecture.trim();
        if let Some(bucket) = self.buckets.get(name) {
            return bucket;
        }
        self.buckets
            .iter()
            .find(|(key, _)| short_name(key) == name || short_name(name) == key.as_str())
            .map_or(self.default_bucket.as_str(), |(_, bucket)| bucket.as_str())
    }
}

fn short_name(name: &str) -> &str {
    name.strip_suffix(['都', '府', '県']).unwrap_or(name)
}

/// Sums of one bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub bucket: String,
    /// Prefectures assigned to the bucket
    pub prefectures: usize,
    /// Column sums, missing values contributing zero
    pub sums: BTreeMap<PopulationColumn, f64>,
}

impl RegionSummary {
    #[must_use]
    pub fn sum(&self, column: PopulationColumn) -> Option<f64> {
        self.sums.get(&column).copied()
    }
}

/// Group records into buckets and sum `columns` per bucket.
///
/// Buckets appear in order of their first prefecture.
#[must_use]
pub fn group_records_by_region(
    records: &[PopulationRecord],
    classification: &RegionClassification,
    columns: &[PopulationColumn],
) -> Vec<RegionSummary> {
    let mut summaries: Vec<RegionSummary> = Vec::new();
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();

    for record in records {
        let bucket = classification.classify(&record.name);
        let idx = *index.entry(bucket).or_insert_with(|| {
            summaries.push(RegionSummary {
                bucket: bucket.to_string(),
                prefectures: 0,
                sums: columns.iter().map(|c| (*c, 0.0)).collect(),
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[idx];
        summary.prefectures += 1;
        for column in columns {
            if let Some(value) = record.value(*column) {
                *summary.sums.entry(*column).or_default() += value;
            }
        }
    }

    summaries
}

/// Group a cleaned table by region, summing the region columns it carries
pub fn group_by_region(
    table: &PopulationTable,
    classification: &RegionClassification,
) -> Result<Vec<RegionSummary>> {
    let columns: Vec<PopulationColumn> = PopulationColumn::REGION_SUM_COLUMNS
        .into_iter()
        .filter(|c| table.has_column(*c))
        .collect();
    Ok(group_records_by_region(
        &table.records()?,
        classification,
        &columns,
    ))
}
