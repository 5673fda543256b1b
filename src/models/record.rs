use serde::{Deserialize, Serialize};

use super::dataset::DatasetKind;
use super::summary::Totals;

// ---------------------------------------------------------------------------
// MergedRecord — One country across all three datasets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<Totals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death: Option<Totals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recover: Option<Totals>,
}

impl MergedRecord {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Default::default()
        }
    }

    pub fn get(&self, kind: DatasetKind) -> Option<&Totals> {
        self.slot(kind).as_ref()
    }

    /// Attach `totals` under `kind`, adding to any totals already present.
    pub fn attach(&mut self, kind: DatasetKind, totals: Totals) {
        let slot = self.slot_mut(kind);
        match slot.as_mut() {
            Some(existing) => *existing += totals,
            None => *slot = Some(totals),
        }
    }

    fn slot(&self, kind: DatasetKind) -> &Option<Totals> {
        match kind {
            DatasetKind::Confirmed => &self.confirm,
            DatasetKind::Deaths => &self.death,
            DatasetKind::Recovered => &self.recover,
        }
    }

    fn slot_mut(&mut self, kind: DatasetKind) -> &mut Option<Totals> {
        match kind {
            DatasetKind::Confirmed => &mut self.confirm,
            DatasetKind::Deaths => &mut self.death,
            DatasetKind::Recovered => &mut self.recover,
        }
    }
}

/// The merged per-country result for one request.
pub type Report = Vec<MergedRecord>;
