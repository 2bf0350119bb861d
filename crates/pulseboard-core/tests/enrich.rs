use chrono::NaiveDate;

use pulseboard_core::aggregate::CountryCounts;
use pulseboard_core::enrich::{build_enriched, derive_records, ENRICHED_COLUMNS};
use pulseboard_core::error::PipelineError;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
}

fn counts(country: &str, values: &[(u32, i64)]) -> CountryCounts {
    let mut counts = CountryCounts::default();
    for &(day, value) in values {
        counts.insert_add(country, date(day), value);
    }
    counts
}

#[test]
fn active_is_confirmed_minus_deaths_minus_recovered() {
    let confirmed = counts("Albania", &[(22, 10)]);
    let deaths = counts("Albania", &[(22, 2)]);
    let recovered = counts("Albania", &[(22, 3)]);

    let records = derive_records(&confirmed, &deaths, &recovered);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].active, 5);
}

#[test]
fn active_floors_at_zero() {
    let confirmed = counts("Albania", &[(22, 5)]);
    let deaths = counts("Albania", &[(22, 4)]);
    let recovered = counts("Albania", &[(22, 4)]);

    let records = derive_records(&confirmed, &deaths, &recovered);
    assert_eq!(records[0].active, 0);
}

#[test]
fn first_date_deltas_are_zero() {
    let confirmed = counts("Albania", &[(22, 10), (23, 15)]);
    let deaths = counts("Albania", &[(22, 3), (23, 4)]);

    let records = derive_records(&confirmed, &deaths, &CountryCounts::default());
    assert_eq!(records[0].new_cases, 0);
    assert_eq!(records[0].new_deaths, 0);
    assert_eq!(records[1].new_cases, 5);
    assert_eq!(records[1].new_deaths, 1);
}

#[test]
fn trailing_mean_shrinks_at_series_start() {
    let confirmed = counts("Albania", &[(22, 10), (23, 15), (24, 15), (25, 40)]);

    let records = derive_records(&confirmed, &CountryCounts::default(), &CountryCounts::default());
    let new_cases: Vec<i64> = records.iter().map(|r| r.new_cases).collect();
    let means: Vec<f64> = records.iter().map(|r| r.new_cases_7ma).collect();

    assert_eq!(new_cases, vec![0, 5, 0, 25]);
    assert_eq!(means, vec![0.0, 2.5, 5.0 / 3.0, 7.5]);
}

#[test]
fn missing_recovered_country_fills_zero() {
    let confirmed = counts("France", &[(22, 2), (23, 3)]);
    let deaths = counts("France", &[(22, 0), (23, 1)]);
    let recovered = counts("Albania", &[(22, 1), (23, 1)]);

    let records = derive_records(&confirmed, &deaths, &recovered);
    assert!(records.iter().all(|r| r.recovered == 0));
    assert_eq!(records[1].active, 2);
}

#[test]
fn deltas_never_cross_country_boundary() {
    let mut confirmed = counts("Albania", &[(22, 100), (23, 110)]);
    confirmed.insert_add("France", date(22), 50);
    confirmed.insert_add("France", date(23), 60);

    let records = derive_records(&confirmed, &CountryCounts::default(), &CountryCounts::default());
    let france_first = records
        .iter()
        .find(|r| r.country == "France" && r.date == date(22))
        .unwrap();
    assert_eq!(france_first.new_cases, 0);
    assert_eq!(france_first.new_cases_7ma, 0.0);
}

#[test]
fn negative_deltas_pass_through() {
    let confirmed = counts("Albania", &[(22, 10), (23, 4)]);

    let records = derive_records(&confirmed, &CountryCounts::default(), &CountryCounts::default());
    assert_eq!(records[1].new_cases, -6);
    assert_eq!(records[1].new_cases_7ma, -3.0);
}

#[test]
fn enriched_frame_carries_expected_columns() {
    let confirmed = counts("Albania", &[(22, 10), (23, 15)]);
    let df = build_enriched(&confirmed, &CountryCounts::default(), &CountryCounts::default())
        .unwrap();

    let names: Vec<&str> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(names, ENRICHED_COLUMNS);
    assert_eq!(df.height(), 2);
}

#[test]
fn empty_confirmed_series_is_an_error() {
    let err = build_enriched(
        &CountryCounts::default(),
        &CountryCounts::default(),
        &CountryCounts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::EmptyResult));
}
