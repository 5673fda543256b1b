//! Output rendering and format negotiation.

mod common;

use covid_stats::render::{format_count, render_html, render_json, render_table};
use covid_stats::{build_report, MergedRecord, OutputFormat, Totals};

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[test]
fn json_is_pretty_printed_with_two_space_indent() {
    let report = build_report(&common::raw_datasets(), true).unwrap();
    let json = render_json(&report).unwrap();
    assert!(json.starts_with("[\n  {\n    \"country\": \"China\""));
}

#[test]
fn json_writes_whole_numbers_without_fraction() {
    let report = build_report(&common::raw_datasets(), true).unwrap();
    let json = render_json(&report).unwrap();
    assert!(json.contains("\"total\": 880,"));
    assert!(!json.contains("880.0"));
}

#[test]
fn json_omits_missing_datasets_and_nulls_nan() {
    let mut record = MergedRecord::new("Short");
    record.confirm = Some(Totals {
        total: 5.0,
        yesterday: 3.0,
        last_7_days: f64::NAN,
    });
    let value: serde_json::Value =
        serde_json::from_str(&render_json(&[record]).unwrap()).unwrap();

    let first = &value[0];
    assert_eq!(first["confirm"]["total"], 5);
    assert!(first["confirm"]["last_7_days"].is_null());
    assert!(first.get("death").is_none());
    assert!(first.get("recover").is_none());
}

#[test]
fn json_null_reads_back_as_nan() {
    let record: MergedRecord = serde_json::from_str(
        r#"{"country":"X","confirm":{"total":1,"yesterday":null,"last_7_days":2.5}}"#,
    )
    .unwrap();
    let confirm = record.confirm.unwrap();
    assert_eq!(confirm.total, 1.0);
    assert!(confirm.yesterday.is_nan());
    assert_eq!(confirm.last_7_days, 2.5);
    assert!(record.death.is_none());
}

// ---------------------------------------------------------------------------
// Text and HTML
// ---------------------------------------------------------------------------

#[test]
fn table_lists_header_and_one_line_per_country() {
    let report = build_report(&common::raw_datasets(), true).unwrap();
    let table = render_table(&report);
    let lines: Vec<&str> = table.lines().collect();

    assert!(lines[0].contains("country"));
    assert!(lines[0].contains("new (7 days)"));
    // header, separator, five countries
    assert_eq!(lines.len(), 7);
    assert!(lines[2].contains("China"));
    assert!(lines[2].contains("880"));
    assert!(lines[2].contains("770"));
}

#[test]
fn table_shows_dash_for_missing_values() {
    let report = build_report(&common::raw_datasets(), true).unwrap();
    let table = render_table(&report);
    let nepal = table.lines().find(|l| l.contains("Nepal")).unwrap();
    assert!(nepal.contains('-'));
}

#[test]
fn html_wraps_escaped_table() {
    let report = vec![MergedRecord::new("A <&> B")];
    let html = render_html(&report);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<pre>"));
    assert!(html.contains("A &lt;&amp;&gt; B"));
    assert!(!html.contains("A <&> B"));
}

#[test]
fn format_count_variants() {
    assert_eq!(format_count(880.0), "880");
    assert_eq!(format_count(-3.0), "-3");
    assert_eq!(format_count(1.25), "1.25");
    assert_eq!(format_count(f64::NAN), "-");
}

// ---------------------------------------------------------------------------
// Negotiation
// ---------------------------------------------------------------------------

#[test]
fn negotiate_defaults_to_json() {
    assert_eq!(
        OutputFormat::negotiate(None, None, None).unwrap(),
        OutputFormat::Json
    );
    assert_eq!(
        OutputFormat::negotiate(None, Some("*/*"), Some("Mozilla/5.0")).unwrap(),
        OutputFormat::Json
    );
}

#[test]
fn negotiate_query_beats_headers() {
    let format =
        OutputFormat::negotiate(Some("html"), Some("application/json"), Some("curl/8.0")).unwrap();
    assert_eq!(format, OutputFormat::Html);
}

#[test]
fn negotiate_uses_first_known_accept_type() {
    let browser = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
    assert_eq!(
        OutputFormat::negotiate(None, Some(browser), None).unwrap(),
        OutputFormat::Html
    );
    assert_eq!(
        OutputFormat::negotiate(None, Some("text/plain; charset=utf-8"), Some("curl/8.0")).unwrap(),
        OutputFormat::Text
    );
}

#[test]
fn negotiate_curl_user_agent_gets_text() {
    assert_eq!(
        OutputFormat::negotiate(None, Some("*/*"), Some("curl/7.68.0")).unwrap(),
        OutputFormat::Text
    );
}

#[test]
fn negotiate_rejects_unknown_query_format() {
    assert!(OutputFormat::negotiate(Some("xml"), None, None).is_err());
}

#[test]
fn content_types_carry_charset() {
    assert_eq!(
        OutputFormat::Json.content_type(),
        "application/json;charset=UTF-8"
    );
    assert_eq!(OutputFormat::Text.content_type(), "text/plain;charset=UTF-8");
    assert_eq!(OutputFormat::Html.content_type(), "text/html;charset=UTF-8");
}
