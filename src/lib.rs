//! COVID-19 per-country summaries for Rust.
//!
//! Downloads the JHU CSSE confirmed, deaths and recovered time series as
//! CSV, reduces each to per-country totals with 1-day and 7-day deltas, and
//! merges the three into one record per country.
//!
//! # Quick start
//!
//! ```no_run
//! use covid_stats::{CovidStats, OutputFormat};
//!
//! let stats = CovidStats::builder().build().unwrap();
//! let report = stats.report(true).unwrap();
//! println!("{}", covid_stats::render(&report, OutputFormat::Text).unwrap());
//! ```
//!
//! The transformation is also available without any network access:
//!
//! ```rust
//! use covid_stats::aggregate::summarize_csv;
//!
//! let csv = "Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20\n\
//!            ,A,0,0,1,2,5\n\
//!            ,A,0,0,1,1,3\n";
//! let summaries = summarize_csv(csv, false).unwrap();
//! assert_eq!(summaries[0].totals.total, 8.0);
//! assert_eq!(summaries[0].totals.yesterday, 5.0);
//! ```

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod merge;
pub mod models;
pub mod render;
#[cfg(feature = "server")]
pub mod server;
pub mod timeseries;

#[cfg(feature = "async")]
pub use async_client::{AsyncCovidStats, DatasetSource, HttpSource, StaticSource};
pub use error::{CovidError, Result};
pub use fetch::{Fetcher, RawDatasets};
pub use merge::{merge, sort_report, Merger};
pub use models::{CountrySummary, DatasetKind, MergedRecord, Report, Totals};
pub use render::{render, OutputFormat};

use std::fmt;
use std::time::Duration;

/// Aggregate each dataset and merge them into one record per country.
///
/// With `sort`, records are ordered by confirmed then death totals;
/// otherwise they keep first-appearance order.
pub fn build_report(raw: &RawDatasets, sort: bool) -> Result<Report> {
    let confirmed = aggregate::summarize_csv(&raw.confirmed, false)?;
    let deaths = aggregate::summarize_csv(&raw.deaths, false)?;
    let recovered = aggregate::summarize_csv(&raw.recovered, false)?;

    let mut report = merge(&confirmed, &deaths, &recovered);
    if sort {
        sort_report(&mut report);
    }
    Ok(report)
}

// ---------------------------------------------------------------------------
// CovidStatsBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CovidStats`] instance.
///
/// Use [`CovidStats::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CovidStatsBuilder::build) to create the client.
pub struct CovidStatsBuilder {
    base_url: String,
    timeout: Duration,
}

impl Default for CovidStatsBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DATA_BASE.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl CovidStatsBuilder {
    /// Fetch datasets from a different base URL.
    ///
    /// The dataset file names are appended to it, so it should point at the
    /// directory holding the three time-series CSVs.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the HTTP request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client. No request is made until a fetch is requested.
    pub fn build(self) -> Result<CovidStats> {
        let fetcher = Fetcher::new(self.base_url, self.timeout)?;
        Ok(CovidStats { fetcher })
    }
}

// ---------------------------------------------------------------------------
// CovidStats
// ---------------------------------------------------------------------------

/// Blocking client: downloads the datasets and builds reports.
///
/// Created via [`CovidStats::builder()`].
pub struct CovidStats {
    fetcher: Fetcher,
}

impl CovidStats {
    /// Create a new builder for configuring the client.
    pub fn builder() -> CovidStatsBuilder {
        CovidStatsBuilder::default()
    }

    /// Download the raw CSV text of all three datasets.
    pub fn fetch_all(&self) -> Result<RawDatasets> {
        self.fetcher.fetch_all()
    }

    /// Download and summarize a single dataset.
    pub fn summaries(&self, kind: DatasetKind, sort: bool) -> Result<Vec<CountrySummary>> {
        let csv = self.fetcher.fetch(kind)?;
        aggregate::summarize_csv(&csv, sort)
    }

    /// Download all datasets and merge them into one record per country.
    pub fn report(&self, sort: bool) -> Result<Report> {
        let raw = self.fetch_all()?;
        build_report(&raw, sort)
    }

    /// Return a reference to the underlying [`Fetcher`].
    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }
}

impl fmt::Display for CovidStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CovidStats(base_url={})", self.fetcher.base_url)
    }
}
