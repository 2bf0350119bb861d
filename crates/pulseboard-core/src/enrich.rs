use chrono::{Duration, NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::aggregate::CountryCounts;
use crate::error::{PipelineError, Result};

const TRAILING_WINDOW: usize = 7;

pub const ENRICHED_COLUMNS: &[&str] = &[
    "country",
    "date",
    "confirmed",
    "deaths",
    "recovered",
    "active",
    "new_cases",
    "new_deaths",
    "new_cases_7ma",
    "new_deaths_7ma",
];

/// One fully derived row of the enriched table.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryDay {
    pub country: String,
    pub date: NaiveDate,
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: i64,
    pub active: i64,
    pub new_cases: i64,
    pub new_deaths: i64,
    pub new_cases_7ma: f64,
    pub new_deaths_7ma: f64,
}

/// Left-join deaths and recovered onto the confirmed keys, derive the
/// per-country columns, and build the enriched dataframe.
pub fn build_enriched(
    confirmed: &CountryCounts,
    deaths: &CountryCounts,
    recovered: &CountryCounts,
) -> Result<DataFrame> {
    let records = derive_records(confirmed, deaths, recovered);
    if records.is_empty() {
        return Err(PipelineError::EmptyResult);
    }
    records_to_dataframe(&records)
}

/// Derived rows in (country, date) order. Confirmed drives the join; a key
/// absent from deaths or recovered contributes 0, never null. Deltas and
/// trailing means never cross a country boundary.
pub fn derive_records(
    confirmed: &CountryCounts,
    deaths: &CountryCounts,
    recovered: &CountryCounts,
) -> Vec<CountryDay> {
    let mut records = Vec::new();

    for (country, series) in confirmed.countries() {
        let mut prev_confirmed: Option<i64> = None;
        let mut prev_deaths: Option<i64> = None;
        let mut case_deltas: Vec<i64> = Vec::with_capacity(series.len());
        let mut death_deltas: Vec<i64> = Vec::with_capacity(series.len());

        for (date, &confirmed_value) in series {
            let deaths_value = deaths.get(country, date).unwrap_or(0);
            let recovered_value = recovered.get(country, date).unwrap_or(0);

            let active = (confirmed_value - deaths_value - recovered_value).max(0);
            let new_cases = prev_confirmed
                .map(|previous| confirmed_value - previous)
                .unwrap_or(0);
            let new_deaths = prev_deaths
                .map(|previous| deaths_value - previous)
                .unwrap_or(0);

            case_deltas.push(new_cases);
            death_deltas.push(new_deaths);

            records.push(CountryDay {
                country: country.clone(),
                date: *date,
                confirmed: confirmed_value,
                deaths: deaths_value,
                recovered: recovered_value,
                active,
                new_cases,
                new_deaths,
                new_cases_7ma: trailing_mean(&case_deltas),
                new_deaths_7ma: trailing_mean(&death_deltas),
            });

            prev_confirmed = Some(confirmed_value);
            prev_deaths = Some(deaths_value);
        }
    }

    records
}

fn trailing_mean(deltas: &[i64]) -> f64 {
    let start = deltas.len().saturating_sub(TRAILING_WINDOW);
    let tail = &deltas[start..];
    tail.iter().sum::<i64>() as f64 / tail.len() as f64
}

fn records_to_dataframe(records: &[CountryDay]) -> Result<DataFrame> {
    let date_series = Series::new(
        "date".into(),
        records
            .iter()
            .map(|record| date_to_days(record.date))
            .collect::<Vec<i32>>(),
    )
    .cast(&DataType::Date)?;

    let columns: Vec<Column> = vec![
        Series::new(
            "country".into(),
            records
                .iter()
                .map(|record| record.country.as_str())
                .collect::<Vec<&str>>(),
        )
        .into(),
        date_series.into(),
        Series::new(
            "confirmed".into(),
            records.iter().map(|record| record.confirmed).collect::<Vec<i64>>(),
        )
        .into(),
        Series::new(
            "deaths".into(),
            records.iter().map(|record| record.deaths).collect::<Vec<i64>>(),
        )
        .into(),
        Series::new(
            "recovered".into(),
            records.iter().map(|record| record.recovered).collect::<Vec<i64>>(),
        )
        .into(),
        Series::new(
            "active".into(),
            records.iter().map(|record| record.active).collect::<Vec<i64>>(),
        )
        .into(),
        Series::new(
            "new_cases".into(),
            records.iter().map(|record| record.new_cases).collect::<Vec<i64>>(),
        )
        .into(),
        Series::new(
            "new_deaths".into(),
            records.iter().map(|record| record.new_deaths).collect::<Vec<i64>>(),
        )
        .into(),
        Series::new(
            "new_cases_7ma".into(),
            records
                .iter()
                .map(|record| record.new_cases_7ma)
                .collect::<Vec<f64>>(),
        )
        .into(),
        Series::new(
            "new_deaths_7ma".into(),
            records
                .iter()
                .map(|record| record.new_deaths_7ma)
                .collect::<Vec<f64>>(),
        )
        .into(),
    ];

    Ok(DataFrame::new(columns)?)
}

pub(crate) fn date_to_days(date: NaiveDate) -> i32 {
    (date - NaiveDateTime::UNIX_EPOCH.date()).num_days() as i32
}

pub(crate) fn days_to_date(days: i32) -> NaiveDate {
    NaiveDateTime::UNIX_EPOCH.date() + Duration::days(days as i64)
}
