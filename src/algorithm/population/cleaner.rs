//! Cleaning of the raw population-change table.
//!
//! Raw columns are renamed by position, the grand-total row is dropped and
//! every numeric column is coerced from locale-formatted text to `Float64`.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{Array, BooleanArray, StringArray};
use arrow::record_batch::RecordBatch;
use log::{debug, info, warn};

use crate::error::{Error, Result, ValueCoercionWarning};
use crate::models::{CleanedPopulation, PopulationTable};
use crate::schema::{PopulationColumn, cleaned_schema, coerce_numeric_array, map_columns};
use crate::utils::arrow::{downcast_array, filter_rows};

/// Clean a raw population table.
///
/// # Errors
///
/// Returns [`Error::Schema`] when the table is too narrow to carry the
/// prefecture-name column or that column is not text. Unparseable numbers
/// never fail: they become nulls and are listed in
/// [`CleanedPopulation::warnings`].
pub fn clean_population_data(raw: &RecordBatch, total_sentinel: &str) -> Result<CleanedPopulation> {
    let start = Instant::now();
    let mapping = map_columns(raw.num_columns())?;
    if mapping.dropped > 0 {
        warn!(
            "Population table has {} column(s) beyond the {}-column schema; dropping them",
            mapping.dropped,
            mapping.columns.len()
        );
    }

    let name_column = raw.column(PopulationColumn::PrefectureName.position());
    let names = downcast_array::<StringArray>(
        name_column,
        PopulationColumn::PrefectureName.canonical_name(),
        "String",
    )
    .map_err(|_| {
        Error::schema(
            "population",
            format!(
                "column '{}' is {:?}, expected text",
                PopulationColumn::PrefectureName,
                name_column.data_type()
            ),
        )
    })?;

    let keep: BooleanArray = names
        .iter()
        .map(|name| Some(name.is_none_or(|n| n.trim() != total_sentinel)))
        .collect();
    let removed_total_rows = keep.false_count();

    let projection: Vec<usize> = (0..mapping.columns.len()).collect();
    let filtered = filter_rows(&raw.project(&projection)?, &keep)?;

    let mut columns = Vec::with_capacity(mapping.columns.len());
    let mut warnings = Vec::new();
    for (idx, column) in mapping.columns.iter().enumerate() {
        let array = filtered.column(idx);
        if column.is_numeric() {
            let (coerced, column_warnings) =
                coerce_numeric_array(array, column.canonical_name(), column.allows_negative())?;
            columns.push(coerced);
            warnings.extend(column_warnings);
        } else {
            columns.push(Arc::clone(array));
        }
    }

    let batch = RecordBatch::try_new(Arc::new(cleaned_schema(&mapping.columns)), columns)?;
    let table = PopulationTable::new(batch, mapping.columns.clone())?;

    report_warnings(&warnings);
    let duplicate_prefectures = find_duplicates(&table)?;
    info!(
        "Cleaned population table: {} rows, {} columns, {} total row(s) removed in {:?}",
        table.num_rows(),
        mapping.columns.len(),
        removed_total_rows,
        start.elapsed()
    );

    Ok(CleanedPopulation {
        table,
        warnings,
        dropped_columns: mapping.dropped,
        removed_total_rows,
        duplicate_prefectures,
    })
}

fn report_warnings(warnings: &[ValueCoercionWarning]) {
    let mut per_column: BTreeMap<&str, usize> = BTreeMap::new();
    for w in warnings {
        debug!("Unparseable value {:?} in '{}' row {}", w.raw, w.column, w.row);
        *per_column.entry(w.column.as_str()).or_default() += 1;
    }
    for (column, count) in per_column {
        warn!("{count} value(s) in '{column}' could not be parsed and were set to missing");
    }
}

/// Prefecture names carried by more than one row, in order of first repeat.
///
/// The rows themselves are kept; only the names are reported.
fn find_duplicates(table: &PopulationTable) -> Result<Vec<String>> {
    let records = table.records()?;
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for record in &records {
        if record.name.is_empty() || seen.insert(record.name.as_str()) {
            continue;
        }
        if !duplicates.contains(&record.name) {
            warn!("Prefecture '{}' appears more than once", record.name);
            duplicates.push(record.name.clone());
        }
    }
    Ok(duplicates)
}
