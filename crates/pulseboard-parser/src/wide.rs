use chrono::NaiveDate;
use csv::StringRecord;

use crate::errors::ParserError;
use crate::model::{Metric, RegionRow, SeriesTable};

static DATE_FORMATS: &[&str] = &["%m/%d/%y", "%Y-%m-%d"];

#[derive(Debug, Clone, Copy)]
enum ColumnRole {
    Region,
    Country,
    Latitude,
    Longitude,
    Date(NaiveDate),
}

/// Parse one wide-format series table: key columns followed by one column per
/// calendar date, dates strictly increasing left to right.
pub fn parse_wide_table(metric: Metric, content: &str) -> Result<SeriesTable, ParserError> {
    let table = metric.canonical_name();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut records = reader.records();

    let header = records
        .next()
        .ok_or(ParserError::InvalidHeader {
            table,
            message: "file missing header row".to_string(),
        })?
        .map_err(|err| ParserError::Csv { table, source: err })?;

    let roles = classify_columns(table, &header)?;
    ensure_layout(table, &roles)?;

    let dates: Vec<NaiveDate> = roles
        .iter()
        .filter_map(|role| match role {
            ColumnRole::Date(date) => Some(*date),
            _ => None,
        })
        .collect();

    let mut rows = Vec::new();
    for (row_idx, record) in records.enumerate() {
        let record = record.map_err(|err| ParserError::Csv { table, source: err })?;
        let line_index = row_idx + 2;

        if record.len() != roles.len() {
            return Err(ParserError::DataRow {
                table,
                line_index,
                message: format!(
                    "expected {} columns but found {}",
                    roles.len(),
                    record.len()
                ),
            });
        }

        rows.push(parse_row(table, &header, &roles, &record, line_index)?);
    }

    if rows.is_empty() {
        return Err(ParserError::EmptyData { table });
    }

    Ok(SeriesTable {
        metric,
        dates,
        rows,
    })
}

fn classify_columns(
    table: &'static str,
    header: &StringRecord,
) -> Result<Vec<ColumnRole>, ParserError> {
    let mut roles = Vec::with_capacity(header.len());
    let mut previous_date: Option<NaiveDate> = None;

    for (idx, column) in header.iter().enumerate() {
        let role = classify_column(table, idx, column)?;
        if let ColumnRole::Date(date) = role {
            if let Some(previous) = previous_date {
                if date <= previous {
                    return Err(ParserError::DateOrder {
                        table,
                        column: column.trim().to_string(),
                        previous,
                    });
                }
            }
            previous_date = Some(date);
        }
        roles.push(role);
    }

    Ok(roles)
}

fn classify_column(
    table: &'static str,
    index: usize,
    column: &str,
) -> Result<ColumnRole, ParserError> {
    let trimmed = column.trim();
    if trimmed.eq_ignore_ascii_case("province/state") || trimmed.eq_ignore_ascii_case("province_state")
    {
        return Ok(ColumnRole::Region);
    }
    if trimmed.eq_ignore_ascii_case("country/region") || trimmed.eq_ignore_ascii_case("country_region")
    {
        return Ok(ColumnRole::Country);
    }
    if trimmed.eq_ignore_ascii_case("lat") {
        return Ok(ColumnRole::Latitude);
    }
    if trimmed.eq_ignore_ascii_case("long") || trimmed.eq_ignore_ascii_case("long_") {
        return Ok(ColumnRole::Longitude);
    }
    if let Some(date) = parse_date_header(trimmed) {
        return Ok(ColumnRole::Date(date));
    }

    Err(ParserError::UnclassifiableColumn {
        table,
        column_index: index,
        column: trimmed.to_string(),
    })
}

fn parse_date_header(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn ensure_layout(table: &'static str, roles: &[ColumnRole]) -> Result<(), ParserError> {
    let country_count = roles
        .iter()
        .filter(|role| matches!(role, ColumnRole::Country))
        .count();
    if country_count != 1 {
        return Err(ParserError::InvalidHeader {
            table,
            message: format!("expected exactly one country column, found {country_count}"),
        });
    }

    let date_count = roles
        .iter()
        .filter(|role| matches!(role, ColumnRole::Date(_)))
        .count();
    if date_count == 0 {
        return Err(ParserError::InvalidHeader {
            table,
            message: "no date columns found".to_string(),
        });
    }

    Ok(())
}

fn parse_row(
    table: &'static str,
    header: &StringRecord,
    roles: &[ColumnRole],
    record: &StringRecord,
    line_index: usize,
) -> Result<RegionRow, ParserError> {
    let mut region: Option<String> = None;
    let mut country: Option<String> = None;
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;
    let mut values = Vec::with_capacity(roles.len());

    for (idx, role) in roles.iter().enumerate() {
        let column = header.get(idx).unwrap_or("");
        let value = record.get(idx).unwrap_or("");
        match role {
            ColumnRole::Region => region = clean_optional(value),
            ColumnRole::Country => country = clean_optional(value),
            ColumnRole::Latitude => {
                latitude = parse_optional_f64(table, value, line_index, column)?;
            }
            ColumnRole::Longitude => {
                longitude = parse_optional_f64(table, value, line_index, column)?;
            }
            ColumnRole::Date(_) => {
                values.push(parse_required_i64(table, value, line_index, column)?);
            }
        }
    }

    let country = country.ok_or(ParserError::DataRow {
        table,
        line_index,
        message: "country field is empty".to_string(),
    })?;
    let region = region.unwrap_or_else(|| country.clone());

    Ok(RegionRow {
        region,
        country,
        latitude,
        longitude,
        values,
    })
}

fn clean_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_optional_f64(
    table: &'static str,
    value: &str,
    line_index: usize,
    column: &str,
) -> Result<Option<f64>, ParserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|err| ParserError::DataRow {
            table,
            line_index,
            message: format!("failed to parse column '{column}' as float: {err}"),
        })
}

fn parse_required_i64(
    table: &'static str,
    value: &str,
    line_index: usize,
    column: &str,
) -> Result<i64, ParserError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|err| ParserError::DataRow {
            table,
            line_index,
            message: format!("failed to parse column '{column}' as integer: {err}"),
        })
}
