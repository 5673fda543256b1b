//! HTTP endpoint serving the merged report.
//!
//! Built on axum. [`router`] wires the routes to a shared [`AppState`];
//! [`serve`] runs it on an already-bound listener.

pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::async_client::AsyncCovidStats;
use crate::config;
use crate::error::Result;

pub use error::AppError;
pub use state::AppState;

/// Runtime settings for the server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub base_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:3000".to_string(),
            base_url: config::DATA_BASE.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            cache_ttl: config::DEFAULT_CACHE_TTL,
        }
    }
}

impl ServerConfig {
    /// Build the shared state for these settings, fetching over HTTP.
    pub fn state(&self) -> Result<Arc<AppState>> {
        let stats = AsyncCovidStats::builder()
            .base_url(self.base_url.clone())
            .timeout(self.timeout)
            .build()?;
        Ok(Arc::new(AppState::new(stats, self.cache_ttl)))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::get_report))
        .route("/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve requests on `listener` until the process stops.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{addr}");
    }
    axum::serve(listener, router(state)).await
}
