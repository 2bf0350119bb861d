use chrono::NaiveDate;

use pulseboard_core::aggregate::CountryCounts;
use pulseboard_core::dataset::{DashboardState, EnrichedDataset};
use pulseboard_core::enrich::build_enriched;
use pulseboard_core::risk::RiskTier;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
}

fn sample_dataset() -> EnrichedDataset {
    let mut confirmed = CountryCounts::default();
    let mut deaths = CountryCounts::default();
    let mut recovered = CountryCounts::default();

    for (day, c, d, r) in [(22, 10, 0, 0), (23, 15, 1, 2), (24, 15, 1, 5), (25, 40, 2, 10)] {
        confirmed.insert_add("Albania", date(day), c);
        deaths.insert_add("Albania", date(day), d);
        recovered.insert_add("Albania", date(day), r);
    }
    for (day, c, d) in [(22, 2, 0), (23, 3, 0), (24, 5, 0), (25, 8, 1)] {
        confirmed.insert_add("France", date(day), c);
        deaths.insert_add("France", date(day), d);
    }

    EnrichedDataset::new(build_enriched(&confirmed, &deaths, &recovered).unwrap())
}

#[test]
fn filters_by_country_subset_and_date_range() {
    let dataset = sample_dataset();

    let albania = vec!["Albania".to_string()];
    let frame = dataset
        .filter(Some(&albania), Some(date(23)), Some(date(24)))
        .unwrap();
    assert_eq!(frame.height(), 2);

    let open_ended = dataset.filter(None, Some(date(25)), None).unwrap();
    assert_eq!(open_ended.height(), 2);
}

#[test]
fn latest_date_is_the_maximum_date() {
    let dataset = sample_dataset();
    assert_eq!(dataset.latest_date().unwrap(), date(25));
}

#[test]
fn summary_totals_across_all_countries() {
    let dataset = sample_dataset();
    let summary = dataset.summary(None).unwrap();

    assert_eq!(summary.date, date(25));
    assert_eq!(summary.confirmed, 48);
    assert_eq!(summary.deaths, 3);
    assert_eq!(summary.recovered, 10);
    assert_eq!(summary.active, 35);
    assert_eq!(summary.new_cases, 28);
    assert_eq!(summary.fatality_rate, Some(3.0 / 48.0));
}

#[test]
fn summary_respects_country_subset() {
    let dataset = sample_dataset();
    let france = vec!["France".to_string()];
    let summary = dataset.summary(Some(&france)).unwrap();

    assert_eq!(summary.confirmed, 8);
    assert_eq!(summary.fatality_rate, Some(1.0 / 8.0));
}

#[test]
fn fatality_rate_is_undefined_without_confirmed_cases() {
    let mut confirmed = CountryCounts::default();
    confirmed.insert_add("Atlantis", date(22), 0);
    let dataset = EnrichedDataset::new(
        build_enriched(&confirmed, &CountryCounts::default(), &CountryCounts::default()).unwrap(),
    );

    let summary = dataset.summary(None).unwrap();
    assert_eq!(summary.fatality_rate, None);
}

#[test]
fn risk_tiers_at_latest_date() {
    let mut confirmed = CountryCounts::default();
    for (day, value) in [(22, 0), (23, 500), (24, 1000), (25, 1500)] {
        confirmed.insert_add("Highland", date(day), value);
    }
    for (day, value) in [(22, 0), (23, 40), (24, 80), (25, 120)] {
        confirmed.insert_add("Midland", date(day), value);
    }
    for (day, value) in [(22, 0), (23, 1), (24, 2), (25, 3)] {
        confirmed.insert_add("Lowland", date(day), value);
    }
    let dataset = EnrichedDataset::new(
        build_enriched(&confirmed, &CountryCounts::default(), &CountryCounts::default()).unwrap(),
    );

    let entries = dataset.risk_by_country().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].country, "Highland");
    assert_eq!(entries[0].tier, RiskTier::High);
    assert_eq!(entries[2].country, "Midland");
    assert_eq!(entries[2].tier, RiskTier::Medium);

    let lowland = dataset.risk_for("Lowland").unwrap().unwrap();
    assert_eq!(lowland.tier, RiskTier::Low);
    assert!(dataset.risk_for("Atlantis").unwrap().is_none());
}

#[test]
fn state_starts_empty_and_replaces_wholesale() {
    let mut state = DashboardState::new();
    assert!(state.current().is_none());

    state.install(sample_dataset());
    assert_eq!(state.current().unwrap().frame().height(), 8);
}
