use chrono::{DateTime, TimeDelta, Utc};
use log::debug;
use crate::readings::ValueWithTimestamp;

/// Default retention of live readings in minutes
pub const RETENTION_MINUTES: i64 = 60;

/// Returns the oldest timestamp kept by default when merging live readings
///
/// # Arguments
///
/// * 'now' - current time
pub fn default_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - TimeDelta::minutes(RETENTION_MINUTES)
}

/// Returns the index of the first reading at or after the target
fn bisect(values: &[ValueWithTimestamp], target: DateTime<Utc>) -> usize {
    values.partition_point(|v| v.timestamp < target)
}

/// Merges a freshly polled batch of live readings into the retained window.
///
/// Readings older than the cutoff are evicted and new readings already covered by the
/// retained window are skipped. The last reading of each polled batch is taken off the
/// regular sampling cadence by the source, so the retained window drops its own last
/// reading as well as any reading with a sub-second component. The newest batch is kept
/// as is, including its off-cadence tail.
///
/// Both inputs must be sorted by time, neither is modified.
///
/// # Arguments
///
/// * 'new_values' - the freshly polled batch
/// * 'existing' - the currently retained readings
/// * 'cutoff' - oldest timestamp to retain
pub fn merge_new_with_old_values(
    new_values: &[ValueWithTimestamp],
    existing: &[ValueWithTimestamp],
    cutoff: DateTime<Utc>) -> Vec<ValueWithTimestamp> {

    let Some(last_existing) = existing.last() else {
        return new_values.to_vec();
    };
    let max_existing = last_existing.timestamp;

    let retention_index = bisect(existing, cutoff);
    let new_index = bisect(new_values, max_existing);

    let retained = if retention_index < existing.len() {
        &existing[retention_index..existing.len() - 1]
    } else {
        &existing[existing.len()..]
    };
    let added = &new_values[new_index..];

    let mut merged: Vec<ValueWithTimestamp> = retained.iter()
        .filter(|v| v.timestamp.timestamp_subsec_nanos() == 0)
        .copied()
        .collect();
    debug!("merge kept {} of {} existing and added {} of {} new readings",
        merged.len(), existing.len(), added.len(), new_values.len());

    merged.extend_from_slice(added);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 11, 20, 18, 0, 0).unwrap()
            + TimeDelta::minutes(minute as i64)
            + TimeDelta::seconds(second as i64)
    }

    fn series(start: u32, count: u32) -> Vec<ValueWithTimestamp> {
        (start..start + count).map(|m| ValueWithTimestamp::new(at(m, 0), m as f64)).collect()
    }

    #[test]
    fn empty_existing_returns_new() {
        let new_values = series(0, 5);
        assert_eq!(merge_new_with_old_values(&new_values, &[], at(0, 0)), new_values);
    }

    #[test]
    fn drops_last_existing_and_appends_new() {
        let existing = series(0, 10);
        let new_values = series(10, 5);
        let merged = merge_new_with_old_values(&new_values, &existing, at(0, 0));
        assert_eq!(merged.len(), 9 + 5);
        assert_eq!(merged[8].timestamp, at(8, 0));
        assert_eq!(merged[9].timestamp, at(10, 0));
    }

    #[test]
    fn overlap_is_not_duplicated() {
        let existing = series(0, 10);
        let new_values = series(5, 10);
        let merged = merge_new_with_old_values(&new_values, &existing, at(0, 0));
        let minutes: Vec<f64> = merged.iter().map(|v| v.value).collect();
        assert_eq!(minutes, (0..15).map(|m| m as f64).collect::<Vec<f64>>());
    }

    #[test]
    fn evicts_readings_before_cutoff() {
        let existing = series(40, 20);
        let new_values = series(59, 3);
        let cutoff = at(52, 0);
        let merged = merge_new_with_old_values(&new_values, &existing, cutoff);
        assert!(merged.iter().all(|v| v.timestamp >= cutoff));
        assert_eq!(merged.first().map(|v| v.timestamp), Some(cutoff));
    }

    #[test]
    fn filters_off_cadence_readings_from_existing_only() {
        let mut existing = series(0, 5);
        existing.insert(3, ValueWithTimestamp::new(at(2, 0) + TimeDelta::milliseconds(437), 99.0));
        let new_values = vec![
            ValueWithTimestamp::new(at(5, 0), 5.0),
            ValueWithTimestamp::new(at(5, 0) + TimeDelta::milliseconds(120), 6.0),
        ];
        let merged = merge_new_with_old_values(&new_values, &existing, at(0, 0));
        let values: Vec<f64> = merged.iter().map(|v| v.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 5.0, 6.0]);
    }

    #[test]
    fn filters_microsecond_jitter_from_existing() {
        let existing = vec![
            ValueWithTimestamp::new(at(0, 0), 1.0),
            ValueWithTimestamp::new(at(0, 0) + TimeDelta::nanoseconds(1), 2.0),
            ValueWithTimestamp::new(at(0, 0) + TimeDelta::microseconds(500), 3.0),
            ValueWithTimestamp::new(at(0, 10), 4.0),
            ValueWithTimestamp::new(at(0, 20), 5.0),
        ];
        let merged = merge_new_with_old_values(&[], &existing, at(0, 0));
        let values: Vec<f64> = merged.iter().map(|v| v.value).collect();
        assert_eq!(values, vec![1.0, 4.0]);
    }

    #[test]
    fn everything_before_cutoff_keeps_only_new() {
        let existing = series(0, 5);
        let new_values = series(5, 3);
        let merged = merge_new_with_old_values(&new_values, &existing, at(30, 0));
        assert_eq!(merged, new_values);
    }

    #[test]
    fn empty_new_values_keep_retained_existing() {
        let existing = series(0, 5);
        let merged = merge_new_with_old_values(&[], &existing, at(0, 0));
        assert_eq!(merged, existing[..4].to_vec());
    }

    #[test]
    fn single_existing_reading() {
        let existing = series(0, 1);
        let new_values = series(0, 2);
        let merged = merge_new_with_old_values(&new_values, &existing, at(0, 0));
        assert_eq!(merged, new_values);
    }
}
