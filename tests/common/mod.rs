//! Shared CSV fixtures for the covid-stats integration tests.
//!
//! The fixtures follow the upstream layout: province, country, lat, long,
//! then one cumulative count per day. Each has eight day columns so the
//! 7-day delta is defined.
#![allow(dead_code)]

use covid_stats::RawDatasets;

pub const HEADER: &str =
    "Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20,1/25/20,1/26/20,1/27/20,1/28/20,1/29/20";

/// Confirmed cases: China split across two provinces, a quoted region name
/// containing a comma, and a country (Japan) missing from the deaths file.
pub fn confirmed_csv() -> String {
    [
        HEADER,
        "Hubei,China,30.97,112.27,100,200,300,400,500,600,700,800",
        "Beijing,China,40.18,116.41,10,20,30,40,50,60,70,80",
        ",Japan,36.0,138.0,1,1,2,2,3,4,5,7",
        "\"Diamond Princess, Yokohama\",Others,35.44,139.63,0,0,10,20,40,60,61,64",
        ",Italy,43.0,12.0,0,0,0,0,0,2,3,20",
    ]
    .join("\n")
}

pub fn deaths_csv() -> String {
    [
        HEADER,
        "Hubei,China,30.97,112.27,1,2,4,8,16,32,40,50",
        "Beijing,China,40.18,116.41,0,0,0,0,1,1,1,1",
        "\"Diamond Princess, Yokohama\",Others,35.44,139.63,0,0,0,0,0,0,0,0",
        ",Italy,43.0,12.0,0,0,0,0,0,0,1,1",
    ]
    .join("\n")
}

/// Recovered cases, including a country (Nepal) absent from both other files.
pub fn recovered_csv() -> String {
    [
        HEADER,
        "Hubei,China,30.97,112.27,0,0,5,10,20,30,40,60",
        ",Japan,36.0,138.0,0,0,0,0,1,1,1,1",
        ",Nepal,28.16,84.25,0,0,0,0,0,1,1,1",
    ]
    .join("\n")
}

pub fn raw_datasets() -> RawDatasets {
    RawDatasets {
        confirmed: confirmed_csv(),
        deaths: deaths_csv(),
        recovered: recovered_csv(),
    }
}

/// Build a time-series CSV from `(province, country, counts)` rows.
pub fn csv_from_rows(rows: &[(&str, &str, &[f64])]) -> String {
    let days = rows.iter().map(|(_, _, s)| s.len()).max().unwrap_or(0);
    let mut lines = vec![{
        let mut h = String::from("Province/State,Country/Region,Lat,Long");
        for d in 0..days {
            h.push_str(&format!(",d{}", d));
        }
        h
    }];
    for (province, country, series) in rows {
        let counts: Vec<String> = series.iter().map(|v| v.to_string()).collect();
        lines.push(format!("{},{},0,0,{}", province, country, counts.join(",")));
    }
    lines.join("\n")
}
