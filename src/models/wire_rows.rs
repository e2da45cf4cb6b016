use serde::{Deserialize, Deserializer};
use serde::de::Error;
use serde_json::Value;

/// One row as delivered by the metering API: `[isoTimestamp, value]`
#[derive(Deserialize, Debug)]
pub struct WireRow(
    pub String,
    #[serde(deserialize_with = "deserialize_numeric")]
    pub f64,
);

/// Accepts both JSON numbers and numeric strings
fn deserialize_numeric<'de, D>(deserializer: D) -> Result<f64, D::Error>
where D: Deserializer<'de> {

    let v = Value::deserialize(deserializer)?;
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| Error::custom(format!("non numeric value: {}", v)))
}
