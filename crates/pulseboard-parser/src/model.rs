use chrono::NaiveDate;

/// Which of the three cumulative series a table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Confirmed,
    Deaths,
    Recovered,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Confirmed, Metric::Deaths, Metric::Recovered];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            Metric::Confirmed => "confirmed",
            Metric::Deaths => "deaths",
            Metric::Recovered => "recovered",
        }
    }

    pub fn source_filename(&self) -> &'static str {
        match self {
            Metric::Confirmed => "time_series_covid19_confirmed_global.csv",
            Metric::Deaths => "time_series_covid19_deaths_global.csv",
            Metric::Recovered => "time_series_covid19_recovered_global.csv",
        }
    }
}

/// One sub-national row of a wide table. A blank region label falls back to
/// the country name at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRow {
    pub region: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub values: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct SeriesTable {
    pub metric: Metric,
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<RegionRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRecord {
    pub country: String,
    pub date: NaiveDate,
    pub value: i64,
}

impl SeriesTable {
    pub fn long_records(&self) -> Vec<LongRecord> {
        let mut records = Vec::with_capacity(self.rows.len() * self.dates.len());
        for row in &self.rows {
            for (idx, date) in self.dates.iter().enumerate() {
                records.push(LongRecord {
                    country: row.country.clone(),
                    date: *date,
                    value: row.values[idx],
                });
            }
        }
        records
    }
}
