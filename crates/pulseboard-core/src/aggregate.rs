use std::collections::BTreeMap;

use chrono::NaiveDate;
use pulseboard_parser::SeriesTable;

/// Country-level cumulative counts, one date-keyed series per country.
#[derive(Debug, Clone, Default)]
pub struct CountryCounts {
    countries: BTreeMap<String, BTreeMap<NaiveDate, i64>>,
}

impl CountryCounts {
    pub fn insert_add(&mut self, country: &str, date: NaiveDate, value: i64) {
        let series = self.countries.entry(country.to_string()).or_default();
        *series.entry(date).or_insert(0) += value;
    }

    pub fn get(&self, country: &str, date: &NaiveDate) -> Option<i64> {
        self.countries
            .get(country)
            .and_then(|series| series.get(date))
            .copied()
    }

    pub fn countries(&self) -> impl Iterator<Item = (&String, &BTreeMap<NaiveDate, i64>)> {
        self.countries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

/// Unpivot a wide table to long records and sum sub-national rows per
/// (country, date).
pub fn aggregate_by_country(table: &SeriesTable) -> CountryCounts {
    let mut counts = CountryCounts::default();
    for record in table.long_records() {
        counts.insert_add(&record.country, record.date, record.value);
    }
    counts
}
