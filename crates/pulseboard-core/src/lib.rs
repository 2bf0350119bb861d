pub mod error;
pub mod aggregate;
pub mod enrich;
pub mod risk;
pub mod dataset;
pub mod refresh;
pub mod export;
