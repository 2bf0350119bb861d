use std::time::Duration;

use anyhow::{Context, Result};
use pulseboard_core::error::PipelineError;
use pulseboard_core::refresh::SeriesSource;
use pulseboard_parser::Metric;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series";

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// HTTP source for the upstream wide CSV tables. Each fetch runs under the
/// client's request deadline, so a stalled upstream fails the refresh instead
/// of hanging it.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, metric: Metric) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            metric.source_filename()
        )
    }
}

impl SeriesSource for HttpSource {
    async fn fetch(&self, metric: Metric) -> pulseboard_core::error::Result<Vec<u8>> {
        let url = self.url(metric);
        debug!(%url, "fetching series table");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| PipelineError::Fetch {
                metric: metric.canonical_name(),
                message: err.to_string(),
            })?;

        let response = response
            .error_for_status()
            .map_err(|err| PipelineError::Fetch {
                metric: metric.canonical_name(),
                message: err.to_string(),
            })?;

        let body = response
            .bytes()
            .await
            .map_err(|err| PipelineError::Fetch {
                metric: metric.canonical_name(),
                message: err.to_string(),
            })?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_filename_without_double_slash() {
        let source = HttpSource::new("https://example.test/data/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            source.url(Metric::Confirmed),
            "https://example.test/data/time_series_covid19_confirmed_global.csv"
        );
    }
}
