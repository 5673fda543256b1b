use std::time::Duration;

use crate::models::DatasetKind;

pub const DATA_BASE: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series";

pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";
pub const TEXT_CONTENT_TYPE: &str = "text/plain;charset=UTF-8";
pub const HTML_CONTENT_TYPE: &str = "text/html;charset=UTF-8";

pub const CACHE_CONTROL: &str = "max-age=300";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Upstream file name for each dataset.
pub fn dataset_file(kind: DatasetKind) -> &'static str {
    match kind {
        DatasetKind::Confirmed => "time_series_19-covid-Confirmed.csv",
        DatasetKind::Deaths => "time_series_19-covid-Deaths.csv",
        DatasetKind::Recovered => "time_series_19-covid-Recovered.csv",
    }
}

/// Full URL of a dataset under `base`. A trailing slash on `base` is ignored.
pub fn dataset_url(base: &str, kind: DatasetKind) -> String {
    format!("{}/{}", base.trim_end_matches('/'), dataset_file(kind))
}
