//! HTTP fetchers against a local file server.
//!
//! The fixtures are served by a small axum app on `127.0.0.1:0`, running on
//! its own thread and runtime so the blocking client can be exercised from
//! plain `#[test]` functions.

mod common;

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use covid_stats::config::dataset_file;
use covid_stats::{
    build_report, CovidError, CovidStats, DatasetKind, DatasetSource, HttpSource,
};

/// Serve `kinds` from the fixtures; any other path answers 404.
fn serve_fixtures(kinds: &[DatasetKind]) -> String {
    let raw = common::raw_datasets();
    let files: Vec<(String, String)> = kinds
        .iter()
        .map(|&kind| (format!("/{}", dataset_file(kind)), raw.get(kind).to_string()))
        .collect();

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let mut app = Router::new();
            for (path, body) in files {
                app = app.route(
                    &path,
                    get(move || {
                        let body = body.clone();
                        async move { body }
                    }),
                );
            }
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{}", rx.recv().unwrap())
}

fn client(base: &str) -> CovidStats {
    CovidStats::builder()
        .base_url(base)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

const ALL: [DatasetKind; 3] = [
    DatasetKind::Confirmed,
    DatasetKind::Deaths,
    DatasetKind::Recovered,
];

// ---------------------------------------------------------------------------
// Blocking client
// ---------------------------------------------------------------------------

#[test]
fn fetch_all_downloads_each_dataset() {
    let base = serve_fixtures(&ALL);
    let raw = client(&base).fetch_all().unwrap();
    assert_eq!(raw, common::raw_datasets());
}

#[test]
fn report_matches_offline_build() {
    let base = serve_fixtures(&ALL);
    let report = client(&base).report(true).unwrap();
    let expected = build_report(&common::raw_datasets(), true).unwrap();
    assert_eq!(report, expected);
}

#[test]
fn base_url_trailing_slash_is_ignored() {
    let base = serve_fixtures(&ALL);
    let summaries = client(&format!("{base}/"))
        .summaries(DatasetKind::Confirmed, true)
        .unwrap();
    assert_eq!(summaries[0].country, "China");
    assert_eq!(summaries[0].totals.total, 880.0);
}

#[test]
fn missing_file_fails_whole_batch() {
    let base = serve_fixtures(&[DatasetKind::Confirmed, DatasetKind::Recovered]);
    let err = client(&base).report(true).unwrap_err();
    match err {
        CovidError::Upstream { url, status } => {
            assert_eq!(status, 404);
            assert!(url.ends_with(dataset_file(DatasetKind::Deaths)));
        }
        other => panic!("expected Upstream error, got {other:?}"),
    }
}

#[test]
fn single_fetch_reports_upstream_status() {
    let base = serve_fixtures(&[]);
    let err = client(&base).fetcher().fetch(DatasetKind::Confirmed).unwrap_err();
    assert!(matches!(err, CovidError::Upstream { status: 404, .. }));
}

// ---------------------------------------------------------------------------
// Async HttpSource
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_source_fetches_and_maps_404() {
    let base = serve_fixtures(&[DatasetKind::Deaths]);
    let source = HttpSource::new(base, Duration::from_secs(10)).unwrap();

    let deaths = source.fetch(DatasetKind::Deaths).await.unwrap();
    assert_eq!(deaths, common::deaths_csv());

    let err = source.fetch(DatasetKind::Recovered).await.unwrap_err();
    assert!(matches!(err, CovidError::Upstream { status: 404, .. }));
}
