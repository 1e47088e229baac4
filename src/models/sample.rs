//! Synthetic population table used when the real source is unavailable.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::record_batch::RecordBatch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::models::population::PopulationTable;
use crate::schema::{PopulationColumn, cleaned_schema};

/// Prefectures of the sample table
pub const SAMPLE_PREFECTURES: [&str; 10] = [
    "東京都",
    "神奈川県",
    "大阪府",
    "愛知県",
    "埼玉県",
    "千葉県",
    "兵庫県",
    "北海道",
    "福岡県",
    "静岡県",
];

const SAMPLE_COLUMNS: [PopulationColumn; 8] = [
    PopulationColumn::PrefectureName,
    PopulationColumn::TotalPopulation,
    PopulationColumn::NetChangeRate,
    PopulationColumn::NetChange,
    PopulationColumn::NaturalChange,
    PopulationColumn::SocialChange,
    PopulationColumn::Births,
    PopulationColumn::Deaths,
];

/// Deterministic synthetic cleaned table of ten prefectures
pub fn sample_population(seed: u64) -> Result<PopulationTable> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = SAMPLE_PREFECTURES.len();

    let mut ints = |low: i64, high: i64| -> Vec<f64> {
        (0..n)
            .map(|_| rng.random_range(low..high) as f64)
            .collect()
    };
    let total = ints(500_000, 14_000_000);
    let net_change = ints(-50_000, 50_000);
    let natural = ints(-30_000, 10_000);
    let social = ints(-20_000, 40_000);
    let births = ints(5_000, 100_000);
    let deaths = ints(10_000, 150_000);
    let rate: Vec<f64> = (0..n)
        .map(|_| (rng.random_range(-1.5..1.0) * 100.0_f64).round() / 100.0)
        .collect();

    let float = |values: Vec<f64>| Arc::new(Float64Array::from(values)) as ArrayRef;
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(SAMPLE_PREFECTURES.to_vec())),
        float(total),
        float(rate),
        float(net_change),
        float(natural),
        float(social),
        float(births),
        float(deaths),
    ];

    let batch = RecordBatch::try_new(Arc::new(cleaned_schema(&SAMPLE_COLUMNS)), columns)?;
    PopulationTable::new(batch, SAMPLE_COLUMNS.to_vec())
}
