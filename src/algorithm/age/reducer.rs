//! Reduction of raw age-distribution tables to their national rows.

use std::collections::BTreeMap;

use arrow::array::{Array, StringArray};
use arrow::record_batch::RecordBatch;
use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{AgeRow, ReducedAgeTable};
use crate::schema::{AGE_BRACKET_COUNT, AGE_BRACKET_LABELS, AgeTableLayout, Sex, parse_locale_number};
use crate::utils::arrow::downcast_array;

fn text_column<'a>(raw: &'a RecordBatch, index: usize, role: &str, year: u16) -> Result<&'a StringArray> {
    if index >= raw.num_columns() {
        return Err(Error::schema(
            format!("{year} age data"),
            format!(
                "{role} column {} missing: table has {} column(s)",
                index + 1,
                raw.num_columns()
            ),
        ));
    }
    downcast_array::<StringArray>(raw.column(index), role, "String")
}

fn optional_text_column(raw: &RecordBatch, index: usize) -> Option<&StringArray> {
    if index >= raw.num_columns() {
        return None;
    }
    raw.column(index).as_any().downcast_ref::<StringArray>()
}

fn cell(array: Option<&StringArray>, row: usize) -> Option<&str> {
    array.filter(|a| row < a.len() && !a.is_null(row)).map(|a| a.value(row))
}

/// Parse one count cell; unparseable and negative values become missing
fn count(array: Option<&StringArray>, row: usize, label: &str, year: u16) -> Option<f64> {
    let raw = cell(array, row)?;
    match parse_locale_number(raw) {
        Some(v) if v >= 0.0 => Some(v),
        _ => {
            warn!("{year} age data: value {raw:?} in bracket {label} set to missing");
            None
        }
    }
}

/// Reduce one raw age table to its national rows, keyed by sex.
///
/// Rows whose prefecture column matches a national label are kept; the
/// first row seen for each sex wins. A table without a national
/// both-sexes row yields a reduction lacking [`Sex::Both`], which the
/// cohort series skips.
///
/// # Errors
///
/// Returns [`Error::Schema`] if the prefecture or sex column is absent.
pub fn clean_age_data(raw: &RecordBatch, year: u16, layout: &AgeTableLayout) -> Result<ReducedAgeTable> {
    let prefectures = text_column(raw, layout.prefecture_column, "prefecture", year)?;
    let sexes = text_column(raw, layout.sex_column, "sex", year)?;

    let total = layout
        .total_column
        .and_then(|index| optional_text_column(raw, index));
    let brackets: Vec<Option<&StringArray>> = (0..AGE_BRACKET_COUNT)
        .map(|k| optional_text_column(raw, layout.first_bracket_column + k))
        .collect();

    let present = brackets.iter().filter(|b| b.is_some()).count();
    if present < AGE_BRACKET_COUNT {
        warn!("{year} age data: only {present} of {AGE_BRACKET_COUNT} age-bracket columns present");
    }

    let mut reduced = ReducedAgeTable::empty(year);
    for row in 0..raw.num_rows() {
        let Some(prefecture) = cell(Some(prefectures), row) else {
            continue;
        };
        if !layout.is_national(prefecture) {
            continue;
        }
        let Some(sex) = cell(Some(sexes), row).and_then(|s| layout.sex_labels.parse(s)) else {
            debug!("{year} age data: national row {row} has an unrecognised sex code");
            continue;
        };
        if reduced.rows.contains_key(&sex) {
            warn!("{year} age data: duplicate national {sex} row {row} ignored");
            continue;
        }

        let values = brackets
            .iter()
            .zip(AGE_BRACKET_LABELS)
            .map(|(array, label)| count(*array, row, label, year))
            .collect();
        reduced.rows.insert(
            sex,
            AgeRow {
                sex,
                total: count(total, row, "total", year),
                brackets: values,
            },
        );
    }

    if !reduced.rows.contains_key(&Sex::Both) {
        warn!("{year} age data: no national both-sexes row found");
    }
    info!(
        "Reduced {year} age data: {} national row(s) from {} rows",
        reduced.rows.len(),
        raw.num_rows()
    );

    Ok(reduced)
}

/// Reduce every loaded year.
///
/// A year whose table cannot be reduced is logged and contributes an
/// empty reduction; it never aborts the others.
#[must_use]
pub fn clean_age_tables(
    tables: &BTreeMap<u16, RecordBatch>,
    layout: &AgeTableLayout,
) -> BTreeMap<u16, ReducedAgeTable> {
    tables
        .iter()
        .map(|(&year, raw)| {
            let reduced = clean_age_data(raw, year, layout).unwrap_or_else(|err| {
                warn!("{year} age data could not be reduced: {err}");
                ReducedAgeTable::empty(year)
            });
            (year, reduced)
        })
        .collect()
}
