//! Per-country aggregation of time-series rows.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::Result;
use crate::models::CountrySummary;
use crate::timeseries::{self, TimeSeriesRow};

/// Sum the totals of every region belonging to the same country.
///
/// Countries are matched by exact name and appear in the order they were
/// first seen. Repeated rows for a country always add up.
pub fn group_by_country(rows: &[TimeSeriesRow]) -> Vec<CountrySummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<CountrySummary> = Vec::new();

    for row in rows {
        let totals = row.totals();
        match index.get(row.country.as_str()) {
            Some(&i) => out[i].totals += totals,
            None => {
                index.insert(&row.country, out.len());
                out.push(CountrySummary::new(row.country.clone(), totals));
            }
        }
    }

    out
}

/// Stable sort, largest `total` first. NaN totals go last.
pub fn sort_by_total(summaries: &mut [CountrySummary]) {
    summaries.sort_by(|a, b| desc_nan_last(a.totals.total, b.totals.total));
}

/// Parse one dataset's CSV and reduce it to per-country summaries.
pub fn summarize_csv(input: &str, sort: bool) -> Result<Vec<CountrySummary>> {
    let rows = timeseries::parse_csv(input)?;
    let mut summaries = group_by_country(&rows);
    if sort {
        sort_by_total(&mut summaries);
    }
    Ok(summaries)
}

/// Descending comparison that treats NaN as smaller than any number.
pub(crate) fn desc_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
