use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::async_client::AsyncCovidStats;
use crate::error::Result;
use crate::models::Report;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Client used to fetch and merge the datasets.
    pub stats: AsyncCovidStats,

    /// How long a merged report is reused before fetching again.
    /// Zero disables the cache.
    pub cache_ttl: Duration,

    /// Last merged report, in first-appearance order.
    cached: RwLock<Option<CachedReport>>,

    /// Held while an expired report is being rebuilt.
    refresh: Mutex<()>,
}

struct CachedReport {
    built_at: Instant,
    report: Arc<Report>,
}

impl AppState {
    pub fn new(stats: AsyncCovidStats, cache_ttl: Duration) -> Self {
        Self {
            stats,
            cache_ttl,
            cached: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// The unsorted merged report, from cache while it is fresh.
    ///
    /// Only one request refreshes an expired entry; the others wait for it
    /// and reuse its result.
    pub async fn report(&self) -> Result<Arc<Report>> {
        if self.cache_ttl.is_zero() {
            return Ok(Arc::new(self.stats.report(false).await?));
        }
        if let Some(report) = self.fresh().await {
            debug!("report cache hit");
            return Ok(report);
        }

        let _refresh = self.refresh.lock().await;
        if let Some(report) = self.fresh().await {
            debug!("report cache filled while waiting");
            return Ok(report);
        }

        debug!("report cache miss");
        let report = Arc::new(self.stats.report(false).await?);
        *self.cached.write().await = Some(CachedReport {
            built_at: Instant::now(),
            report: report.clone(),
        });
        Ok(report)
    }

    async fn fresh(&self) -> Option<Arc<Report>> {
        let cached = self.cached.read().await;
        cached
            .as_ref()
            .filter(|entry| entry.built_at.elapsed() < self.cache_ttl)
            .map(|entry| entry.report.clone())
    }
}
