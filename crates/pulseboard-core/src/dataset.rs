use chrono::NaiveDate;
use polars::prelude::*;

use crate::enrich::{date_to_days, days_to_date};
use crate::error::{PipelineError, Result};
use crate::risk::RiskTier;

/// The enriched table plus the queries the reports are built from.
#[derive(Debug, Clone)]
pub struct EnrichedDataset {
    df: DataFrame,
}

/// Latest-date totals across all or selected countries.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub date: NaiveDate,
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: i64,
    pub active: i64,
    pub new_cases: i64,
    pub fatality_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryRisk {
    pub country: String,
    pub new_cases_7ma: f64,
    pub tier: RiskTier,
}

impl EnrichedDataset {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Rows matching the country subset and inclusive date range. `None`
    /// bounds leave that side open.
    pub fn filter(
        &self,
        countries: Option<&[String]>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DataFrame> {
        let country_col = self.df.column("country")?.str()?;
        let date_col = self.df.column("date")?.date()?;
        let start_days = start.map(date_to_days);
        let end_days = end.map(date_to_days);

        let mut mask = Vec::with_capacity(self.df.height());
        for idx in 0..self.df.height() {
            let country_ok = match countries {
                Some(wanted) => country_col
                    .get(idx)
                    .map(|country| wanted.iter().any(|name| name == country))
                    .unwrap_or(false),
                None => true,
            };
            let date_ok = match date_col.get(idx) {
                Some(days) => {
                    start_days.map_or(true, |lo| days >= lo)
                        && end_days.map_or(true, |hi| days <= hi)
                }
                None => false,
            };
            mask.push(country_ok && date_ok);
        }

        let mask = BooleanChunked::from_slice("mask".into(), &mask);
        Ok(self.df.filter(&mask)?)
    }

    pub fn latest_date(&self) -> Result<NaiveDate> {
        let date_col = self.df.column("date")?.date()?;
        date_col
            .max()
            .map(days_to_date)
            .ok_or(PipelineError::EmptyResult)
    }

    pub fn summary(&self, countries: Option<&[String]>) -> Result<Summary> {
        let date = self.latest_date()?;
        let frame = self.filter(countries, Some(date), Some(date))?;
        if frame.height() == 0 {
            return Err(PipelineError::EmptyResult);
        }

        let confirmed = frame.column("confirmed")?.i64()?.sum().unwrap_or(0);
        let deaths = frame.column("deaths")?.i64()?.sum().unwrap_or(0);
        let recovered = frame.column("recovered")?.i64()?.sum().unwrap_or(0);
        let active = frame.column("active")?.i64()?.sum().unwrap_or(0);
        let new_cases = frame.column("new_cases")?.i64()?.sum().unwrap_or(0);

        let fatality_rate = if confirmed > 0 {
            Some(deaths as f64 / confirmed as f64)
        } else {
            None
        };

        Ok(Summary {
            date,
            confirmed,
            deaths,
            recovered,
            active,
            new_cases,
            fatality_rate,
        })
    }

    /// Per-country risk tier at the latest date, in country order.
    pub fn risk_by_country(&self) -> Result<Vec<CountryRisk>> {
        let date = self.latest_date()?;
        let frame = self.filter(None, Some(date), Some(date))?;
        let country_col = frame.column("country")?.str()?;
        let ma_col = frame.column("new_cases_7ma")?.f64()?;

        let mut entries = Vec::with_capacity(frame.height());
        for idx in 0..frame.height() {
            let (Some(country), Some(value)) = (country_col.get(idx), ma_col.get(idx)) else {
                continue;
            };
            entries.push(CountryRisk {
                country: country.to_string(),
                new_cases_7ma: value,
                tier: RiskTier::classify(value),
            });
        }

        Ok(entries)
    }

    pub fn risk_for(&self, country: &str) -> Result<Option<CountryRisk>> {
        let entries = self.risk_by_country()?;
        Ok(entries.into_iter().find(|entry| entry.country == country))
    }
}

/// Holder for the current table. Empty at start, replaced wholesale on a
/// successful refresh, untouched when a refresh fails.
#[derive(Debug, Default)]
pub struct DashboardState {
    current: Option<EnrichedDataset>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&EnrichedDataset> {
        self.current.as_ref()
    }

    pub fn install(&mut self, dataset: EnrichedDataset) {
        self.current = Some(dataset);
    }
}
