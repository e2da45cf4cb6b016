use chrono::{DateTime, Datelike, Days, Offset, TimeDelta, Timelike, Utc};
use chrono_tz::Tz;
use log::debug;
use crate::calendar::{days_in_month, local_instant, roll_date, start_of_day};
use crate::period::{PeriodDescription, UnitSize};
use crate::readings::ValueWithTimestamp;

/// Fills the gaps in a period's readings with zero valued readings so that every slot
/// on the period's grid holds exactly one reading.
///
/// Hour grids step in real hours until the same wall clock time the next day, so DST
/// days get 23 or 25 slots. Month grids (unit size month) are returned unchanged.
///
/// # Arguments
///
/// * 'readings' - readings within the period, sorted by time
/// * 'period_start' - start of the period in the dashboard zone
/// * 'unit_size' - the grid unit
pub fn pad_data(readings: &[ValueWithTimestamp], period_start: DateTime<Tz>, unit_size: UnitSize) -> Vec<ValueWithTimestamp> {
    let padded = match unit_size {
        UnitSize::Hour => pad_hours(readings, period_start),
        UnitSize::Day => pad_days(readings, period_start),
        UnitSize::Month | UnitSize::Minute => readings.to_vec(),
    };
    debug!("padded {} readings to {} slots", readings.len(), padded.len());

    padded
}

/// Pads readings to the grid of the given period
///
/// # Arguments
///
/// * 'readings' - readings within the period, sorted by time
/// * 'period' - the selected period
pub fn pad_period(readings: &[ValueWithTimestamp], period: &PeriodDescription) -> Vec<ValueWithTimestamp> {
    let tz = period.tz();
    pad_data(readings, period.start_of_period().with_timezone(&tz), period.unit_size())
}

fn pad_hours(readings: &[ValueWithTimestamp], period_start: DateTime<Tz>) -> Vec<ValueWithTimestamp> {
    let tz = period_start.timezone();
    let next_day = period_start.naive_local()
        .checked_add_days(Days::new(1))
        .unwrap_or(period_start.naive_local() + TimeDelta::days(1));
    let end = local_instant(&tz, next_day);

    let mut result: Vec<ValueWithTimestamp> = Vec::with_capacity(25);
    let mut step = period_start.with_timezone(&Utc);
    while step < end {
        let slot = step.with_timezone(&tz);
        let found = readings.iter().find(|r| {
            let local = r.timestamp.with_timezone(&tz);
            local.hour() == slot.hour()
                && local.offset().fix() == slot.offset().fix()
                && local.date_naive() == slot.date_naive()
        });
        result.push(found.copied().unwrap_or(ValueWithTimestamp::new(step, 0.0)));
        step += TimeDelta::hours(1);
    }

    result
}

fn pad_days(readings: &[ValueWithTimestamp], period_start: DateTime<Tz>) -> Vec<ValueWithTimestamp> {
    let tz = period_start.timezone();
    let year = period_start.year();
    let month0 = period_start.month0() as i32;

    (1..=days_in_month(year, month0))
        .map(|day| {
            readings.iter()
                .find(|r| {
                    let local = r.timestamp.with_timezone(&tz);
                    local.day() == day && local.month0() as i32 == month0
                })
                .copied()
                .unwrap_or_else(|| ValueWithTimestamp::new(start_of_day(&tz, roll_date(year, month0, day as i32)), 0.0))
        })
        .collect()
}
