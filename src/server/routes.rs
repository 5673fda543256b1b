use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::{HeaderName, ACCEPT, CACHE_CONTROL, CONTENT_TYPE, USER_AGENT};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::AppError;
use super::state::AppState;
use crate::config;
use crate::merge::sort_report;
use crate::render::{render, OutputFormat};

#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub format: Option<String>,
    pub sort: Option<bool>,
}

/// GET /?format=text&sort=false
///
/// The merged per-country report. Format comes from the `format` query, the
/// `Accept` header or a `curl/` User-Agent, in that order. Sorted by
/// confirmed then death totals unless `sort=false`.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ReportParams>, QueryRejection>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Query(params) = params.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let header = |name: HeaderName| headers.get(name).and_then(|v| v.to_str().ok());
    let format = OutputFormat::negotiate(
        params.format.as_deref(),
        header(ACCEPT),
        header(USER_AGENT),
    )?;

    let cached = state.report().await?;
    let body = if params.sort.unwrap_or(true) {
        let mut report = cached.as_ref().clone();
        sort_report(&mut report);
        render(&report, format)?
    } else {
        render(&cached, format)?
    };

    Ok((
        [
            (CONTENT_TYPE, format.content_type()),
            (CACHE_CONTROL, config::CACHE_CONTROL),
        ],
        body,
    )
        .into_response())
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
