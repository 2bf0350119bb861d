use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::errors::ParserError;
use crate::model::Metric;
use crate::parse_wide_table;

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn parses_wide_table_with_regions() {
    let content = fixture("confirmed_global_mini.csv");
    let table = parse_wide_table(Metric::Confirmed, &content).expect("mini table parse failed");

    assert_eq!(table.metric, Metric::Confirmed);
    assert_eq!(
        table.dates,
        vec![date(2020, 1, 22), date(2020, 1, 23), date(2020, 1, 24)]
    );
    assert_eq!(table.rows.len(), 4);

    let nsw = &table.rows[2];
    assert_eq!(nsw.region, "New South Wales");
    assert_eq!(nsw.country, "Australia");
    assert_eq!(nsw.values, vec![3, 4, 6]);
    assert_eq!(nsw.latitude, Some(-33.8688));
}

#[test]
fn blank_region_falls_back_to_country() {
    let content = fixture("confirmed_global_mini.csv");
    let table = parse_wide_table(Metric::Confirmed, &content).unwrap();

    let albania = &table.rows[0];
    assert_eq!(albania.region, "Albania");
    assert_eq!(albania.country, "Albania");
}

#[test]
fn long_records_flatten_rows_by_date() {
    let content = fixture("confirmed_global_mini.csv");
    let table = parse_wide_table(Metric::Confirmed, &content).unwrap();
    let records = table.long_records();

    assert_eq!(records.len(), 12);
    let france_last = records
        .iter()
        .find(|r| r.country == "France" && r.date == date(2020, 1, 24))
        .expect("missing France record");
    assert_eq!(france_last.value, 5);
}

#[test]
fn iso_date_headers_accepted() {
    let content = "Country/Region,Lat,Long,2020-01-22,2020-01-23\nAlbania,41.15,20.17,1,2\n";
    let table = parse_wide_table(Metric::Deaths, content).expect("ISO header parse failed");

    assert_eq!(table.dates, vec![date(2020, 1, 22), date(2020, 1, 23)]);
    assert_eq!(table.rows[0].values, vec![1, 2]);
}

#[test]
fn rejects_out_of_order_date_columns() {
    let content = fixture("dates_out_of_order.csv");
    let err = parse_wide_table(Metric::Confirmed, &content).unwrap_err();

    match err {
        ParserError::DateOrder {
            table,
            column,
            previous,
        } => {
            assert_eq!(table, "confirmed");
            assert_eq!(column, "1/22/20");
            assert_eq!(previous, date(2020, 1, 23));
        }
        other => panic!("expected DateOrder error, got {other:?}"),
    }
}

#[test]
fn rejects_unrecognized_header() {
    let content = "Country/Region,Population,1/22/20\nAlbania,2800000,0\n";
    let err = parse_wide_table(Metric::Recovered, content).unwrap_err();

    match err {
        ParserError::UnclassifiableColumn {
            column_index,
            column,
            ..
        } => {
            assert_eq!(column_index, 1);
            assert_eq!(column, "Population");
        }
        other => panic!("expected UnclassifiableColumn error, got {other:?}"),
    }
}

#[test]
fn rejects_header_only_file() {
    let content = "Country/Region,Lat,Long,1/22/20\n";
    let err = parse_wide_table(Metric::Confirmed, content).unwrap_err();
    assert!(matches!(err, ParserError::EmptyData { table: "confirmed" }));
}

#[test]
fn rejects_missing_date_columns() {
    let content = "Province/State,Country/Region,Lat,Long\n,Albania,41.15,20.17\n";
    let err = parse_wide_table(Metric::Confirmed, content).unwrap_err();
    assert!(matches!(err, ParserError::InvalidHeader { .. }));
}

#[test]
fn rejects_ragged_data_row() {
    let content = "Country/Region,Lat,Long,1/22/20,1/23/20\nAlbania,41.15,20.17,1\n";
    let err = parse_wide_table(Metric::Confirmed, content).unwrap_err();

    match err {
        ParserError::DataRow { line_index, .. } => assert_eq!(line_index, 2),
        other => panic!("expected DataRow error, got {other:?}"),
    }
}

#[test]
fn rejects_non_numeric_count() {
    let content = "Country/Region,Lat,Long,1/22/20\nAlbania,41.15,20.17,n/a\n";
    let err = parse_wide_table(Metric::Confirmed, content).unwrap_err();

    match err {
        ParserError::DataRow { message, .. } => {
            assert!(message.contains("1/22/20"));
        }
        other => panic!("expected DataRow error, got {other:?}"),
    }
}
