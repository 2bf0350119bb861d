use std::future::Future;
use std::path::PathBuf;

use tracing::info;

use pulseboard_parser::{parse_wide_table, Metric, SeriesTable};

use crate::aggregate::aggregate_by_country;
use crate::dataset::{DashboardState, EnrichedDataset};
use crate::enrich::build_enriched;
use crate::error::{PipelineError, Result};

/// Byte-stream provider for the three cumulative series.
pub trait SeriesSource {
    fn fetch(&self, metric: Metric) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Source that reads each series from a fixed filename under one directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SeriesSource for DirectorySource {
    async fn fetch(&self, metric: Metric) -> Result<Vec<u8>> {
        let path = self.root.join(metric.source_filename());
        std::fs::read(&path).map_err(|err| PipelineError::Fetch {
            metric: metric.canonical_name(),
            message: format!("failed to read {}: {err}", path.display()),
        })
    }
}

/// Fetch, parse, aggregate, merge, and derive the three series into a fresh
/// dataset. Any failure along the way fails the whole refresh.
pub async fn run_refresh<S: SeriesSource>(source: &S) -> Result<EnrichedDataset> {
    let confirmed = fetch_table(source, Metric::Confirmed).await?;
    let deaths = fetch_table(source, Metric::Deaths).await?;
    let recovered = fetch_table(source, Metric::Recovered).await?;

    let df = build_enriched(
        &aggregate_by_country(&confirmed),
        &aggregate_by_country(&deaths),
        &aggregate_by_country(&recovered),
    )?;
    info!(rows = df.height(), "built enriched dataset");

    Ok(EnrichedDataset::new(df))
}

/// Run a refresh and install the result. The state is only written on
/// success.
pub async fn refresh_into<S: SeriesSource>(state: &mut DashboardState, source: &S) -> Result<()> {
    let dataset = run_refresh(source).await?;
    state.install(dataset);
    Ok(())
}

async fn fetch_table<S: SeriesSource>(source: &S, metric: Metric) -> Result<SeriesTable> {
    let bytes = source.fetch(metric).await?;
    let content = String::from_utf8(bytes).map_err(|_| PipelineError::Fetch {
        metric: metric.canonical_name(),
        message: "payload is not valid UTF-8".to_string(),
    })?;
    let table = parse_wide_table(metric, &content)?;
    info!(
        metric = metric.canonical_name(),
        rows = table.rows.len(),
        dates = table.dates.len(),
        "parsed series table"
    );
    Ok(table)
}
