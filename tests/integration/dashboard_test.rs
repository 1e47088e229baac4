use jpop_dash::{Error, PopulationOrigin, build_dashboard, load_dataset};
use crate::utils::{Fixture, sample_prefectures, sample_rows};

#[test]
fn test_full_dashboard() {
    let fixture = Fixture::new();
    fixture.write_population(&sample_rows());
    fixture.write_full_age(2022, 10);
    fixture.write_full_age(2023, 9);
    fixture.write_full_age(2024, 8);

    let dataset = load_dataset(&fixture.config);
    let view = build_dashboard(&dataset, &fixture.config).expect("dashboard");

    assert!(view.status.is_complete());
    assert_eq!(view.origin, PopulationOrigin::Source);
    assert_eq!(view.records.len(), sample_prefectures().len());
    assert!(view.records.iter().all(|r| r.name != "合計"));
    assert!(view.warnings.is_empty());
    assert_eq!(view.summary.prefectures, 8);

    let rankings = view.rankings.expect("rankings");
    assert_eq!(rankings.growth.len(), 8);
    assert_eq!(rankings.growth[0].name, "東京都");

    assert_eq!(view.pyramid.expect("pyramid").year, 2024);
    assert_eq!(
        view.cohorts.iter().map(|c| c.year).collect::<Vec<_>>(),
        vec![2022, 2023, 2024]
    );
    assert!(view.metro.iter().any(|s| s.bucket == "三大都市圏"));
    assert!(view.areas.iter().any(|s| s.bucket == "関東"));
}

#[test]
fn test_missing_population_falls_back_to_sample() {
    let fixture = Fixture::new();
    fixture.write_full_age(2024, 2);

    let dataset = load_dataset(&fixture.config);
    let view = build_dashboard(&dataset, &fixture.config).expect("dashboard");

    assert_eq!(view.origin, PopulationOrigin::Sample);
    assert!(!view.records.is_empty());
    assert!(!view.status.population.available);
    assert_eq!(view.cohorts.len(), 1);
    assert_eq!(view.rankings.expect("rankings").growth.len(), 10);
}

#[test]
fn test_missing_age_year_keeps_other_views() {
    let fixture = Fixture::new();
    fixture.write_population(&sample_rows());
    fixture.write_full_age(2022, 4);
    fixture.write_full_age(2024, 4);

    let dataset = load_dataset(&fixture.config);
    let view = build_dashboard(&dataset, &fixture.config).expect("dashboard");

    assert_eq!(
        view.cohorts.iter().map(|c| c.year).collect::<Vec<_>>(),
        vec![2022, 2024]
    );
    assert!(!view.age.contains_key(&2023));
    assert_eq!(view.status.unavailable_messages().len(), 1);
}

#[test]
fn test_population_without_name_column_fails() {
    let fixture = Fixture::new();
    fixture.write_population(&[vec!["01".to_string()], vec!["02".to_string()]]);

    let dataset = load_dataset(&fixture.config);
    let err = build_dashboard(&dataset, &fixture.config).expect_err("schema error");

    assert!(matches!(err, Error::Schema { .. }));
}

#[test]
fn test_view_serializes_to_json() {
    let fixture = Fixture::new();
    fixture.write_population(&sample_rows());

    let dataset = load_dataset(&fixture.config);
    let view = build_dashboard(&dataset, &fixture.config).expect("dashboard");
    let json = serde_json::to_value(&view).expect("json");

    assert_eq!(json["origin"], "source");
    assert!(json["pyramid"].is_null());
    assert_eq!(json["records"].as_array().map(Vec::len), Some(8));
}
