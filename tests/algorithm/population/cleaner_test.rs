use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use jpop_dash::{Error, PopulationColumn, RecordBatch, clean_population_data, read_raw_csv};
use crate::utils::{Fixture, Prefecture, sample_prefectures, sample_rows};

fn raw_batch(rows: &[Vec<&str>]) -> RecordBatch {
    let width = rows[0].len();
    let fields: Vec<Field> = (0..width)
        .map(|i| Field::new(format!("column_{i}"), DataType::Utf8, true))
        .collect();
    let columns: Vec<ArrayRef> = (0..width)
        .map(|i| {
            Arc::new(StringArray::from(
                rows.iter().map(|r| Some(r[i])).collect::<Vec<_>>(),
            )) as ArrayRef
        })
        .collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).expect("valid batch")
}

#[test]
fn test_total_row_removed_and_counts_parsed() {
    let fixture = Fixture::new();
    let tokyo = Prefecture::new("01", "東京都", 7_000_000, 7_200_000, 0.34);
    let mut rows = vec![tokyo.cells()];
    rows.push(crate::utils::total_row(&[tokyo]));
    fixture.write_population(&rows);

    let raw = read_raw_csv(&fixture.config.resolved_population_path(), 5, "population")
        .expect("fixture loads");
    assert_eq!(raw.num_rows(), 2);

    let cleaned = clean_population_data(&raw, "合計").expect("cleans");
    let records = cleaned.table.records().expect("records");

    assert_eq!(records.len(), 1);
    assert_eq!(cleaned.removed_total_rows, 1);
    assert_eq!(records[0].name, "東京都");
    assert_eq!(records[0].total_population, Some(14_200_000.0));
    assert_eq!(records[0].male_population, Some(7_000_000.0));
    assert_eq!(records[0].net_change_rate, Some(0.34));
    assert!(cleaned.warnings.is_empty());
}

#[test]
fn test_no_sentinel_in_cleaned_table() {
    let fixture = Fixture::new();
    fixture.write_population(&sample_rows());
    let raw = read_raw_csv(&fixture.config.resolved_population_path(), 5, "population")
        .expect("fixture loads");

    let cleaned = clean_population_data(&raw, "合計").expect("cleans");
    let records = cleaned.table.records().expect("records");

    assert_eq!(records.len(), sample_prefectures().len());
    assert!(records.iter().all(|r| r.name != "合計"));
}

#[test]
fn test_count_columns_never_negative() {
    let mut rows = vec![
        Prefecture::new("01", "北海道", 2_400_000, 2_700_000, -0.92).cells(),
        Prefecture::new("02", "青森県", 590_000, 640_000, -1.30).cells(),
    ];
    // a negative birth count is malformed
    rows[1][9] = "-12".to_string();
    let borrowed: Vec<Vec<&str>> = rows
        .iter()
        .map(|r| r.iter().map(String::as_str).collect())
        .collect();

    let cleaned = clean_population_data(&raw_batch(&borrowed), "合計").expect("cleans");
    let records = cleaned.table.records().expect("records");

    for record in &records {
        for column in PopulationColumn::ALL {
            if column.is_numeric() && !column.allows_negative() {
                if let Some(value) = record.value(column) {
                    assert!(value >= 0.0, "{column} of {} is {value}", record.name);
                }
            }
        }
    }
    assert_eq!(records[1].births, None);
    assert_eq!(records[0].net_change, Some(-500.0));
    assert_eq!(cleaned.warnings.len(), 1);
    assert_eq!(cleaned.warnings[0].column, "出生数");
}

#[test]
fn test_unparseable_values_become_missing() {
    let raw = raw_batch(&[
        vec!["01", "北海道", "1,234 ", "N/A", "5,100,000"],
        vec!["02", "青森県", "", "600,000", "-"],
    ]);

    let cleaned = clean_population_data(&raw, "合計").expect("cleans");
    let records = cleaned.table.records().expect("records");

    assert_eq!(records[0].male_population, Some(1234.0));
    assert_eq!(records[0].female_population, None);
    assert_eq!(records[1].male_population, None);
    assert_eq!(records[1].total_population, None);
    assert_eq!(
        cleaned
            .warnings
            .iter()
            .map(|w| w.raw.as_str())
            .collect::<Vec<_>>(),
        vec!["N/A", "-"]
    );
}

#[test]
fn test_narrow_table_keeps_prefix_columns() {
    let raw = raw_batch(&[vec!["01", "北海道", "2,400,000"], vec!["00", "合計", "2,400,000"]]);

    let cleaned = clean_population_data(&raw, "合計").expect("cleans");

    assert_eq!(
        cleaned.table.columns(),
        &[
            PopulationColumn::OrganizationCode,
            PopulationColumn::PrefectureName,
            PopulationColumn::MalePopulation,
        ]
    );
    let records = cleaned.table.records().expect("records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].total_population, None);
}

#[test]
fn test_extra_columns_are_dropped() {
    let mut cells = Prefecture::new("13", "東京都", 7_000_000, 7_200_000, 0.34).cells();
    cells.push("extra".to_string());
    cells.push("more".to_string());
    let borrowed: Vec<&str> = cells.iter().map(String::as_str).collect();

    let cleaned = clean_population_data(&raw_batch(&[borrowed]), "合計").expect("cleans");

    assert_eq!(cleaned.dropped_columns, 2);
    assert_eq!(cleaned.table.batch().num_columns(), 24);
    assert_eq!(
        cleaned.table.batch().schema().field(23).name(),
        "社会増減率"
    );
}

#[test]
fn test_missing_name_column_is_schema_error() {
    let raw = raw_batch(&[vec!["01"], vec!["02"]]);

    let err = clean_population_data(&raw, "合計").expect_err("must fail");

    assert!(matches!(err, Error::Schema { .. }));
}

#[test]
fn test_duplicate_prefectures_are_reported() {
    let hokkaido = Prefecture::new("01", "北海道", 2_400_000, 2_700_000, -0.92);
    let aomori = Prefecture::new("02", "青森県", 590_000, 640_000, -1.30);
    let rows = [hokkaido.cells(), aomori.cells(), hokkaido.cells(), hokkaido.cells()];
    let borrowed: Vec<Vec<&str>> = rows
        .iter()
        .map(|r| r.iter().map(String::as_str).collect())
        .collect();

    let cleaned = clean_population_data(&raw_batch(&borrowed), "合計").expect("cleans");

    assert_eq!(cleaned.duplicate_prefectures, vec!["北海道".to_string()]);
    assert_eq!(cleaned.table.num_rows(), 4);
}
