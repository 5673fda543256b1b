//! Blocking download of the three time-series CSV files.
//!
//! The files are fetched concurrently on scoped threads and returned as raw
//! text. Any failed or non-2xx download fails the whole batch.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::config;
use crate::error::{CovidError, Result};
use crate::models::DatasetKind;

/// Raw CSV text of the three datasets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDatasets {
    pub confirmed: String,
    pub deaths: String,
    pub recovered: String,
}

impl RawDatasets {
    pub fn get(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Confirmed => &self.confirmed,
            DatasetKind::Deaths => &self.deaths,
            DatasetKind::Recovered => &self.recovered,
        }
    }
}

/// Downloads dataset CSVs from a base URL.
pub struct Fetcher {
    /// URL the dataset file names are appended to.
    pub base_url: String,
    client: Client,
}

impl Fetcher {
    /// Create a fetcher with the given base URL and request timeout.
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

    /// Download one dataset as text.
    pub fn fetch(&self, kind: DatasetKind) -> Result<String> {
        let url = config::dataset_url(&self.base_url, kind);
        debug!(%url, "fetching dataset");

        let resp = self.client.get(&url).send()?;
        ensure_success(&url, resp.status())?;
        let body = resp.text()?;
        info!(%url, bytes = body.len(), "fetched dataset");
        Ok(body)
    }

    /// Download all three datasets concurrently.
    pub fn fetch_all(&self) -> Result<RawDatasets> {
        let (confirmed, deaths, recovered) = thread::scope(|s| {
            let confirmed = s.spawn(|| self.fetch(DatasetKind::Confirmed));
            let deaths = s.spawn(|| self.fetch(DatasetKind::Deaths));
            let recovered = s.spawn(|| self.fetch(DatasetKind::Recovered));
            (join(confirmed), join(deaths), join(recovered))
        });
        Ok(RawDatasets {
            confirmed: confirmed?,
            deaths: deaths?,
            recovered: recovered?,
        })
    }
}

/// Map a non-2xx upstream status to [`CovidError::Upstream`].
pub(crate) fn ensure_success(url: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(CovidError::Upstream {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

fn join(handle: thread::ScopedJoinHandle<'_, Result<String>>) -> Result<String> {
    handle
        .join()
        .map_err(|_| CovidError::Task("fetch thread panicked".into()))?
}
