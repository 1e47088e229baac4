use std::collections::BTreeMap;

use jpop_dash::schema::AgeTableLayout;
use jpop_dash::{
    Cohort, Error, Sex, clean_age_data, clean_age_tables, cohort_time_series,
    create_population_pyramid, load_dataset, read_raw_csv,
};
use crate::utils::{Fixture, age_row, bracket_values};

fn reduce(fixture: &Fixture, year: u16) -> jpop_dash::ReducedAgeTable {
    let raw = read_raw_csv(&fixture.config.resolved_age_path(year), 2, "age").expect("loads");
    clean_age_data(&raw, year, &AgeTableLayout::default()).expect("reduces")
}

#[test]
fn test_reduction_keeps_national_rows_by_sex() {
    let fixture = Fixture::new();
    fixture.write_full_age(2024, 100);

    let reduced = reduce(&fixture, 2024);

    assert_eq!(reduced.rows.len(), 3);
    let male = reduced.row(Sex::Male).expect("male row");
    assert_eq!(male.brackets.len(), 21);
    assert_eq!(male.brackets[0], Some(100.0));
    assert_eq!(male.brackets[20], Some(2_100.0));
    // the prefecture row for 北海道 is not national
    assert_eq!(reduced.row(Sex::Both).expect("both").brackets[0], Some(201.0));
}

#[test]
fn test_year_without_total_row_contributes_nothing() {
    let fixture = Fixture::new();
    fixture.write_age(
        2023,
        &[
            age_row("合計", "男", &bracket_values(3)),
            age_row("北海道", "計", &bracket_values(1)),
        ],
    );

    let reduced = reduce(&fixture, 2023);

    assert!(reduced.row(Sex::Both).is_none());
    assert!(cohort_time_series(&BTreeMap::from([(2023, reduced)])).is_empty());
}

#[test]
fn test_narrow_table_is_schema_error_but_batch_reduction_survives() {
    let fixture = Fixture::new();
    fixture.write_age(2022, &[vec!["00000".to_string(), "合計".to_string()]]);
    fixture.write_full_age(2024, 5);

    let raw = read_raw_csv(&fixture.config.resolved_age_path(2022), 2, "age").expect("loads");
    let err = clean_age_data(&raw, 2022, &AgeTableLayout::default()).expect_err("no sex column");
    assert!(matches!(err, Error::Schema { .. }));

    let dataset = load_dataset(&fixture.config);
    let reduced = clean_age_tables(&dataset.age, &AgeTableLayout::default());
    assert!(reduced[&2022].is_empty());
    assert_eq!(reduced[&2024].rows.len(), 3);
}

#[test]
fn test_empty_table_yields_empty_reduction() {
    let fixture = Fixture::new();
    fixture.write_age(2024, &[]);

    let reduced = reduce(&fixture, 2024);

    assert!(reduced.is_empty());
}

#[test]
fn test_pyramid_requires_both_sexes() {
    let fixture = Fixture::new();
    fixture.write_age(
        2023,
        &[
            age_row("合計", "計", &bracket_values(2)),
            age_row("合計", "女", &bracket_values(1)),
        ],
    );

    let reduced = reduce(&fixture, 2023);

    assert!(reduced.row(Sex::Female).is_some());
    assert!(create_population_pyramid(&reduced).is_none());
}

#[test]
fn test_pyramid_aligns_brackets() {
    let fixture = Fixture::new();
    fixture.write_full_age(2022, 10);

    let pyramid = create_population_pyramid(&reduce(&fixture, 2022)).expect("pyramid");

    assert_eq!(pyramid.labels.len(), 21);
    assert_eq!(pyramid.male.len(), 21);
    assert_eq!(pyramid.female.len(), 21);
    assert_eq!(pyramid.labels[20], "100+");
    let (label, male, female) = pyramid.iter().next().expect("first bracket");
    assert_eq!(label, "0-4");
    assert_eq!(male, 10.0);
    assert_eq!(female, 11.0);
    assert!(pyramid.male.iter().all(|v| *v >= 0.0));
}

#[test]
fn test_cohort_sums_match_total() {
    let fixture = Fixture::new();
    fixture.write_full_age(2022, 10);
    fixture.write_full_age(2024, 7);

    let dataset = load_dataset(&fixture.config);
    let reduced = clean_age_tables(&dataset.age, &AgeTableLayout::default());
    let series = cohort_time_series(&reduced);

    assert_eq!(series.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2022, 2024]);
    for row in &series {
        let both = reduced[&row.year].row(Sex::Both).expect("both row");
        let total = both.total.expect("total column");
        assert!((row.total() - total).abs() < 1e-6);
    }

    // brackets 1..=3 of scale 10 (male) plus scale 11 (female)
    assert_eq!(series[0].get(Cohort::Child), (10.0 + 20.0 + 30.0) + (11.0 + 22.0 + 33.0));
}

#[test]
fn test_missing_bracket_values_count_as_zero() {
    let fixture = Fixture::new();
    let mut row = age_row("合計", "計", &bracket_values(1));
    row[4] = "N/A".to_string();
    fixture.write_age(2024, &[row]);

    let reduced = reduce(&fixture, 2024);
    let both = reduced.row(Sex::Both).expect("both row");
    assert_eq!(both.brackets[0], None);

    let series = cohort_time_series(&BTreeMap::from([(2024, reduced)]));
    assert_eq!(series[0].child, 2.0 + 3.0);
}
