pub mod errors;
pub mod model;
pub mod wide;

pub use errors::ParserError;
pub use model::{LongRecord, Metric, RegionRow, SeriesTable};
pub use wide::parse_wide_table;

#[cfg(test)]
mod tests;
