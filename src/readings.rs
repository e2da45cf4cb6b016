use std::fmt;
use std::fmt::Formatter;
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use crate::calendar::local_instant;
use crate::errors::ReadingError;
use crate::models::wire_rows::WireRow;

/// Timestamp formats accepted for readings without an offset, interpreted in the dashboard zone
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// One meter reading
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ValueWithTimestamp {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl ValueWithTimestamp {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> ValueWithTimestamp {
        ValueWithTimestamp { timestamp, value }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for ValueWithTimestamp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} -> {:>10.3}", self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"), self.value)
    }
}

/// Decodes the API's `[[timestamp, value], ...]` document into readings sorted by time
///
/// # Arguments
///
/// * 'json' - the API response body
/// * 'tz' - zone used for timestamps lacking an offset
pub fn parse_rows(json: &str, tz: &Tz) -> Result<Vec<ValueWithTimestamp>, ReadingError> {
    let rows: Vec<WireRow> = serde_json::from_str(json)?;

    let mut readings = rows.iter()
        .map(|r| Ok(ValueWithTimestamp::new(parse_timestamp(&r.0, tz)?, r.1)))
        .collect::<Result<Vec<ValueWithTimestamp>, ReadingError>>()?;
    readings.sort_by_key(|r| r.timestamp);

    Ok(readings)
}

/// Parses an ISO timestamp, with or without offset
///
/// # Arguments
///
/// * 'timestamp' - the timestamp string
/// * 'tz' - zone used when the string carries no offset
pub fn parse_timestamp(timestamp: &str, tz: &Tz) -> Result<DateTime<Utc>, ReadingError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Ok(dt.with_timezone(&Utc));
    }

    LOCAL_FORMATS.iter()
        .find_map(|f| NaiveDateTime::parse_from_str(timestamp, f).ok())
        .map(|naive| local_instant(tz, naive))
        .ok_or_else(|| ReadingError::Timestamp(format!("unable to parse '{}'", timestamp)))
}

pub fn sum_values(readings: &[ValueWithTimestamp]) -> f64 {
    readings.iter().map(|r| r.value).sum()
}
