//! Merging of the three per-dataset summaries into one record per country.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::aggregate::desc_nan_last;
use crate::models::{CountrySummary, DatasetKind, MergedRecord, Report};

/// Accumulates summaries from any number of datasets, keyed by country.
///
/// Inserting a country that already exists updates its record in place, so
/// a country missing from one dataset keeps whatever the others supplied.
#[derive(Debug, Default)]
pub struct Merger {
    index: HashMap<String, usize>,
    records: Vec<MergedRecord>,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach one dataset's summaries.
    pub fn add(&mut self, kind: DatasetKind, summaries: &[CountrySummary]) -> &mut Self {
        for summary in summaries {
            let i = match self.index.get(&summary.country) {
                Some(&i) => i,
                None => {
                    let i = self.records.len();
                    self.index.insert(summary.country.clone(), i);
                    self.records.push(MergedRecord::new(summary.country.clone()));
                    i
                }
            };
            self.records[i].attach(kind, summary.totals);
        }
        self
    }

    /// Records in order of first appearance.
    pub fn finish(self) -> Report {
        self.records
    }
}

/// Merge confirmed, death and recovered summaries by country name.
///
/// Every country present in any input appears exactly once in the output.
pub fn merge(
    confirmed: &[CountrySummary],
    deaths: &[CountrySummary],
    recovered: &[CountrySummary],
) -> Report {
    let mut merger = Merger::new();
    merger
        .add(DatasetKind::Confirmed, confirmed)
        .add(DatasetKind::Deaths, deaths)
        .add(DatasetKind::Recovered, recovered);
    merger.finish()
}

/// Stable sort, descending by confirmed total then by death total.
///
/// A missing dataset or NaN total ranks below every number.
pub fn sort_report(report: &mut [MergedRecord]) {
    report.sort_by(|a, b| {
        compare_kind(a, b, DatasetKind::Confirmed)
            .then_with(|| compare_kind(a, b, DatasetKind::Deaths))
    });
}

fn compare_kind(a: &MergedRecord, b: &MergedRecord, kind: DatasetKind) -> Ordering {
    let total = |r: &MergedRecord| r.get(kind).map_or(f64::NAN, |t| t.total);
    desc_nan_last(total(a), total(b))
}
