//! Async client for use in Tokio runtimes.
//!
//! The three datasets are fetched concurrently through a [`DatasetSource`]
//! and awaited together. Parsing and merging run on the blocking thread
//! pool via [`tokio::task::spawn_blocking`].
//!
//! # Example
//!
//! ```no_run
//! use covid_stats::AsyncCovidStats;
//!
//! #[tokio::main]
//! async fn main() {
//!     let stats = AsyncCovidStats::builder().build().unwrap();
//!     let report = stats.report(true).await.unwrap();
//!     println!("{} countries", report.len());
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::config;
use crate::error::{CovidError, Result};
use crate::fetch::{ensure_success, RawDatasets};
use crate::models::{DatasetKind, Report};

// ---------------------------------------------------------------------------
// DatasetSource
// ---------------------------------------------------------------------------

/// Somewhere the raw CSV text of a dataset can be loaded from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self, kind: DatasetKind) -> Result<String>;
}

/// Loads datasets over HTTP from a base URL.
pub struct HttpSource {
    base_url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self, kind: DatasetKind) -> Result<String> {
        let url = config::dataset_url(&self.base_url, kind);
        debug!(%url, "fetching dataset");

        let resp = self.client.get(&url).send().await?;
        ensure_success(&url, resp.status())?;
        let body = resp.text().await?;
        info!(%url, bytes = body.len(), "fetched dataset");
        Ok(body)
    }
}

/// Serves fixed CSV text, for offline use and tests.
pub struct StaticSource {
    data: RawDatasets,
}

impl StaticSource {
    pub fn new(data: RawDatasets) -> Self {
        Self { data }
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    async fn fetch(&self, kind: DatasetKind) -> Result<String> {
        Ok(self.data.get(kind).to_string())
    }
}

// ---------------------------------------------------------------------------
// AsyncCovidStatsBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncCovidStats`] instance.
pub struct AsyncCovidStatsBuilder {
    base_url: String,
    timeout: Duration,
    source: Option<Arc<dyn DatasetSource>>,
}

impl Default for AsyncCovidStatsBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DATA_BASE.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            source: None,
        }
    }
}

impl AsyncCovidStatsBuilder {
    /// Fetch datasets from a different base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom source instead of HTTP. Overrides `base_url` and `timeout`.
    pub fn source(mut self, source: Arc<dyn DatasetSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn build(self) -> Result<AsyncCovidStats> {
        let source = match self.source {
            Some(source) => source,
            None => Arc::new(HttpSource::new(self.base_url, self.timeout)?),
        };
        Ok(AsyncCovidStats { source })
    }
}

// ---------------------------------------------------------------------------
// AsyncCovidStats
// ---------------------------------------------------------------------------

/// Async counterpart of [`CovidStats`](crate::CovidStats).
#[derive(Clone)]
pub struct AsyncCovidStats {
    source: Arc<dyn DatasetSource>,
}

impl AsyncCovidStats {
    pub fn builder() -> AsyncCovidStatsBuilder {
        AsyncCovidStatsBuilder::default()
    }

    /// Fetch all three datasets concurrently. Fails if any one fails.
    pub async fn fetch_all(&self) -> Result<RawDatasets> {
        let (confirmed, deaths, recovered) = tokio::try_join!(
            self.source.fetch(DatasetKind::Confirmed),
            self.source.fetch(DatasetKind::Deaths),
            self.source.fetch(DatasetKind::Recovered),
        )?;
        Ok(RawDatasets {
            confirmed,
            deaths,
            recovered,
        })
    }

    /// Fetch, aggregate and merge into one record per country.
    ///
    /// With `sort`, records are ordered by confirmed then death totals.
    pub async fn report(&self, sort: bool) -> Result<Report> {
        let raw = self.fetch_all().await?;
        tokio::task::spawn_blocking(move || crate::build_report(&raw, sort))
            .await
            .map_err(|e| CovidError::Task(format!("Task join error: {e}")))?
    }
}
