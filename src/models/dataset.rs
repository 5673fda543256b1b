use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CovidError;

// ---------------------------------------------------------------------------
// DatasetKind — Which of the three upstream time series a value came from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetKind {
    #[serde(rename = "confirm")]
    Confirmed,
    #[serde(rename = "death")]
    Deaths,
    #[serde(rename = "recover")]
    Recovered,
}

impl DatasetKind {
    /// Key under which this dataset's totals appear in a merged record.
    pub fn key(self) -> &'static str {
        match self {
            DatasetKind::Confirmed => "confirm",
            DatasetKind::Deaths => "death",
            DatasetKind::Recovered => "recover",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DatasetKind {
    type Err = CovidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "confirm" | "confirmed" => Ok(DatasetKind::Confirmed),
            "death" | "deaths" => Ok(DatasetKind::Deaths),
            "recover" | "recovered" => Ok(DatasetKind::Recovered),
            other => Err(CovidError::InvalidArgument(format!(
                "Unknown dataset kind: {}",
                other
            ))),
        }
    }
}
