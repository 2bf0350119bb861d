use std::io::Cursor;

use chrono::NaiveDate;
use polars::prelude::*;

use crate::dataset::EnrichedDataset;
use crate::enrich::{date_to_days, ENRICHED_COLUMNS};
use crate::error::{PipelineError, Result};

/// Serialize an enriched frame to delimited text, one row per
/// (country, date), one column per derived field.
pub fn to_csv_bytes(df: &DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let mut clone = df.clone();
        CsvWriter::new(&mut cursor)
            .include_header(true)
            .finish(&mut clone)?;
    }
    Ok(buffer)
}

/// Re-import a previously exported table without re-running the reshape.
/// Round-trips every field exactly.
pub fn from_csv_bytes(bytes: &[u8]) -> Result<EnrichedDataset> {
    let cursor = Cursor::new(bytes);
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(cursor)
        .finish()?;

    let names: Vec<&str> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    if names != ENRICHED_COLUMNS {
        return Err(PipelineError::Validation(format!(
            "unexpected export columns {names:?}, expected {ENRICHED_COLUMNS:?}"
        )));
    }

    let date_series = parse_date_column(&df)?;
    df.replace("date", date_series)?;

    for name in ["confirmed", "deaths", "recovered", "active", "new_cases", "new_deaths"] {
        let cast = df.column(name)?.as_materialized_series().cast(&DataType::Int64)?;
        df.replace(name, cast)?;
    }
    for name in ["new_cases_7ma", "new_deaths_7ma"] {
        let cast = df.column(name)?.as_materialized_series().cast(&DataType::Float64)?;
        df.replace(name, cast)?;
    }

    Ok(EnrichedDataset::new(df))
}

fn parse_date_column(df: &DataFrame) -> Result<Series> {
    let date_col = df.column("date")?.str()?;
    let mut days = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = date_col.get(idx).ok_or_else(|| {
            PipelineError::Validation(format!("date value missing at row {idx}"))
        })?;
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|err| {
            PipelineError::Validation(format!("invalid date '{value}' at row {idx}: {err}"))
        })?;
        days.push(date_to_days(date));
    }

    Ok(Series::new("date".into(), days).cast(&DataType::Date)?)
}
