//! Output formats for a merged report and the negotiation between them.

use std::fmt;
use std::str::FromStr;

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::config;
use crate::error::{CovidError, Result};
use crate::models::{MergedRecord, Totals};

/// Response body format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// Plain-text table for terminals.
    Text,
    /// The text table wrapped in a minimal HTML page.
    Html,
}

impl OutputFormat {
    /// Pick a format from the request.
    ///
    /// An explicit `format` query wins, then the `Accept` header, then a
    /// `curl/` User-Agent (which gets the text table). JSON otherwise.
    pub fn negotiate(
        query: Option<&str>,
        accept: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<Self> {
        if let Some(q) = query {
            return q.parse();
        }
        if let Some(format) = accept.and_then(Self::from_accept) {
            return Ok(format);
        }
        if user_agent.is_some_and(|ua| ua.starts_with("curl/")) {
            return Ok(OutputFormat::Text);
        }
        Ok(OutputFormat::Json)
    }

    /// First media range in an `Accept` header that names a known format.
    fn from_accept(accept: &str) -> Option<Self> {
        accept.split(',').find_map(|range| {
            let media = range.split(';').next().unwrap_or("").trim();
            match media.to_ascii_lowercase().as_str() {
                "application/json" => Some(OutputFormat::Json),
                "text/plain" => Some(OutputFormat::Text),
                "text/html" => Some(OutputFormat::Html),
                _ => None,
            }
        })
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Json => config::JSON_CONTENT_TYPE,
            OutputFormat::Text => config::TEXT_CONTENT_TYPE,
            OutputFormat::Html => config::HTML_CONTENT_TYPE,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CovidError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" | "table" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            other => Err(CovidError::InvalidArgument(format!(
                "Unknown output format: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
            OutputFormat::Html => "html",
        })
    }
}

/// Render a report in the requested format.
pub fn render(report: &[MergedRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Text => Ok(render_table(report)),
        OutputFormat::Html => Ok(render_html(report)),
    }
}

pub fn render_json(report: &[MergedRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

const TABLE_HEADER: [&str; 6] = [
    "country",
    "confirmed",
    "deaths",
    "recovered",
    "new (1 day)",
    "new (7 days)",
];

/// Text table, one row per country. The delta columns are confirmed cases.
pub fn render_table(report: &[MergedRecord]) -> String {
    let mut builder = Builder::default();
    builder.push_record(TABLE_HEADER);
    for record in report {
        let total = |t: Option<&Totals>| t.map_or(f64::NAN, |t| t.total);
        builder.push_record([
            record.country.clone(),
            format_count(total(record.confirm.as_ref())),
            format_count(total(record.death.as_ref())),
            format_count(total(record.recover.as_ref())),
            format_count(record.confirm.map_or(f64::NAN, |t| t.yesterday)),
            format_count(record.confirm.map_or(f64::NAN, |t| t.last_7_days)),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::psql());
    table.modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

pub fn render_html(report: &[MergedRecord]) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>COVID-19 by country</title>\n</head>\n<body>\n<pre>\n{}\n</pre>\n</body>\n</html>\n",
        escape_html(&render_table(report))
    )
}

/// Whole numbers print without decimals, NaN prints as `-`.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        "-".to_string()
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
