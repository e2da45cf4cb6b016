#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Europe::Amsterdam;
use chrono_tz::Tz;
use meterdash::readings::ValueWithTimestamp;

pub const TZ: Tz = Amsterdam;

/// Fixed "now" used across tests
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 11, 20, 19, 0, 0).unwrap()
}

/// Local wall clock time in the dashboard zone
pub fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    TZ.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap().with_timezone(&Utc)
}

/// Readings every `step` seconds starting at `start`
pub fn live_series(start: DateTime<Utc>, count: i64, step: i64) -> Vec<ValueWithTimestamp> {
    (0..count)
        .map(|i| ValueWithTimestamp::new(start + TimeDelta::seconds(i * step), 100.0 + i as f64))
        .collect()
}

/// Wire rows as the API sends them
pub fn wire_rows(readings: &[ValueWithTimestamp]) -> String {
    let rows: Vec<String> = readings.iter()
        .map(|r| format!("[\"{}\", {}]", r.timestamp.to_rfc3339(), r.value))
        .collect();
    format!("[{}]", rows.join(","))
}
