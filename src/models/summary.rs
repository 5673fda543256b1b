use std::ops::AddAssign;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Totals — The three figures reported for one country in one dataset
// ---------------------------------------------------------------------------

/// Cumulative total plus trailing-window deltas.
///
/// Values are `f64` so that unparseable cells and too-short series surface
/// as NaN. NaN is written to JSON as `null`; whole numbers are written
/// without a fractional part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(serialize_with = "ser_count", deserialize_with = "de_count")]
    pub total: f64,
    #[serde(serialize_with = "ser_count", deserialize_with = "de_count")]
    pub yesterday: f64,
    #[serde(serialize_with = "ser_count", deserialize_with = "de_count")]
    pub last_7_days: f64,
}

impl AddAssign for Totals {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.yesterday += rhs.yesterday;
        self.last_7_days += rhs.last_7_days;
    }
}

// ---------------------------------------------------------------------------
// CountrySummary — Totals for one country in one dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country: String,
    #[serde(flatten)]
    pub totals: Totals,
}

impl CountrySummary {
    pub fn new(country: impl Into<String>, totals: Totals) -> Self {
        Self {
            country: country.into(),
            totals,
        }
    }
}

// 2^53: largest range where every integer is exactly representable.
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

fn ser_count<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_nan() || value.is_infinite() {
        serializer.serialize_none()
    } else if value.fract() == 0.0 && value.abs() < MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn de_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
