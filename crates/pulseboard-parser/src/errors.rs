use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{table} header invalid: {message}")]
    InvalidHeader {
        table: &'static str,
        message: String,
    },

    #[error("{table} column {column_index} ('{column}') is neither a key column nor a date")]
    UnclassifiableColumn {
        table: &'static str,
        column_index: usize,
        column: String,
    },

    #[error("{table} date columns out of order: '{column}' does not increase past {previous}")]
    DateOrder {
        table: &'static str,
        column: String,
        previous: NaiveDate,
    },

    #[error("{table} CSV error: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{table} data row {line_index} invalid: {message}")]
    DataRow {
        table: &'static str,
        line_index: usize,
        message: String,
    },

    #[error("{table} file did not contain any data rows")]
    EmptyData { table: &'static str },
}
