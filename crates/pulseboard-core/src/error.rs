use thiserror::Error;

use pulseboard_parser::ParserError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Parse failure: {0}")]
    Parse(#[from] ParserError),

    #[error("Fetch failure for {metric}: {message}")]
    Fetch {
        metric: &'static str,
        message: String,
    },

    #[error("Refresh produced an empty dataset")]
    EmptyResult,

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
