//! Parsing of the wide CSSE time-series CSV layout.
//!
//! Each data row carries four metadata columns (province/state,
//! country/region, latitude, longitude) followed by one cumulative count per
//! day. The header row is skipped.

use tracing::warn;

use crate::error::Result;
use crate::models::Totals;

/// Index of the first day column.
pub const FIRST_DAY_COLUMN: usize = 4;

/// One region's row from a time-series CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesRow {
    pub province: String,
    pub country: String,
    pub lat: f64,
    pub long: f64,
    /// Daily cumulative counts, oldest first.
    pub series: Vec<f64>,
}

impl TimeSeriesRow {
    /// Build a row from its raw CSV fields.
    ///
    /// Returns `None` when the row has no country column.
    pub fn from_fields<'a, I>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter();
        let province = fields.next()?.to_string();
        let country = fields.next()?.to_string();
        let lat = fields.next().map(to_number).unwrap_or(f64::NAN);
        let long = fields.next().map(to_number).unwrap_or(f64::NAN);
        let series = fields.map(to_number).collect();
        Some(Self {
            province,
            country,
            lat,
            long,
            series,
        })
    }

    /// Last value in the series.
    pub fn total(&self) -> f64 {
        self.back(0)
    }

    /// Last value minus the value `days` earlier.
    pub fn delta(&self, days: usize) -> f64 {
        self.back(0) - self.back(days)
    }

    /// Total plus the 1-day and 7-day trailing deltas.
    pub fn totals(&self) -> Totals {
        Totals {
            total: self.total(),
            yesterday: self.delta(1),
            last_7_days: self.delta(7),
        }
    }

    // Value `offset` days before the last one, NaN if the series is too short.
    fn back(&self, offset: usize) -> f64 {
        self.series
            .len()
            .checked_sub(offset + 1)
            .and_then(|i| self.series.get(i))
            .copied()
            .unwrap_or(f64::NAN)
    }
}

/// Coerce a CSV cell to a number.
///
/// Surrounding whitespace is ignored and an empty cell counts as zero.
/// Anything else that does not parse to a finite number (including `inf`
/// and `nan` spellings) becomes NaN.
pub fn to_number(cell: &str) -> f64 {
    let cell = cell.trim();
    if cell.is_empty() {
        return 0.0;
    }
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(f64::NAN)
}

/// Parse CSV text into rows, skipping the header.
///
/// Rows without a country column are dropped with a warning. Errors from the
/// CSV reader are returned as-is.
pub fn parse_csv(input: &str) -> Result<Vec<TimeSeriesRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        match TimeSeriesRow::from_fields(record.iter()) {
            Some(row) => rows.push(row),
            None => warn!(line = idx + 2, "skipping row without a country column"),
        }
    }
    Ok(rows)
}
