//! Top-N and bottom-N rankings over a numeric column.

use std::cmp::Ordering;

use itertools::Itertools;
use serde::Serialize;

use crate::error::Result;
use crate::models::{PopulationRecord, PopulationTable};
use crate::schema::PopulationColumn;

/// Sort direction of a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Largest values first
    Top,
    /// Smallest values first
    Bottom,
}

/// Rank records by `column` and keep the first `n`.
///
/// The sort is stable, so ties keep their original row order. Records
/// missing the value sort after every present value in both directions.
/// Exactly `min(n, records.len())` records are returned.
#[must_use]
pub fn rank_records(
    records: &[PopulationRecord],
    column: PopulationColumn,
    n: usize,
    order: RankOrder,
) -> Vec<PopulationRecord> {
    records
        .iter()
        .sorted_by(|a, b| compare(a.value(column), b.value(column), order))
        .take(n)
        .cloned()
        .collect()
}

fn compare(a: Option<f64>, b: Option<f64>, order: RankOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            RankOrder::Top => b.total_cmp(&a),
            RankOrder::Bottom => a.total_cmp(&b),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The `n` prefectures with the largest `column` values
pub fn top_n(
    table: &PopulationTable,
    column: PopulationColumn,
    n: usize,
) -> Result<Vec<PopulationRecord>> {
    table.require_column(column)?;
    Ok(rank_records(&table.records()?, column, n, RankOrder::Top))
}

/// The `n` prefectures with the smallest `column` values
pub fn bottom_n(
    table: &PopulationTable,
    column: PopulationColumn,
    n: usize,
) -> Result<Vec<PopulationRecord>> {
    table.require_column(column)?;
    Ok(rank_records(&table.records()?, column, n, RankOrder::Bottom))
}

/// Row of the change-rate ranking view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRateRow {
    pub name: String,
    pub net_change_rate: Option<f64>,
    pub net_change: Option<f64>,
}

impl From<&PopulationRecord> for ChangeRateRow {
    fn from(record: &PopulationRecord) -> Self {
        Self {
            name: record.name.clone(),
            net_change_rate: record.net_change_rate,
            net_change: record.net_change,
        }
    }
}

/// Fastest-growing and fastest-shrinking prefectures by net-change rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRateRankings {
    pub growth: Vec<ChangeRateRow>,
    pub decline: Vec<ChangeRateRow>,
}

/// Growth and decline rankings by net-change rate, `n` rows each
pub fn change_rate_rankings(table: &PopulationTable, n: usize) -> Result<ChangeRateRankings> {
    let column = PopulationColumn::NetChangeRate;
    table.require_column(column)?;
    let records = table.records()?;

    let project = |rows: Vec<PopulationRecord>| -> Vec<ChangeRateRow> {
        rows.iter().map(ChangeRateRow::from).collect()
    };
    Ok(ChangeRateRankings {
        growth: project(rank_records(&records, column, n, RankOrder::Top)),
        decline: project(rank_records(&records, column, n, RankOrder::Bottom)),
    })
}
