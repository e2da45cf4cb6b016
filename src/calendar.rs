use chrono::{DateTime, Datelike, Days, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Builds a date from raw calendar fields, rolling over out of range values the way
/// a wall calendar does, i.e. month 12 is January next year, month -1 is December the
/// year before and day 0 is the last day of the previous month. Returns None when the
/// date falls outside the representable calendar.
///
/// # Arguments
///
/// * 'year' - the year
/// * 'month0' - zero based month, may be out of range
/// * 'day' - one based day of month, may be out of range
pub fn checked_roll_date(year: i32, month0: i32, day: i32) -> Option<NaiveDate> {
    let year = i32::try_from(year as i64 + month0.div_euclid(12) as i64).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month0.rem_euclid(12) as u32 + 1, 1)?;

    let offset = day as i64 - 1;
    if offset >= 0 {
        first.checked_add_days(Days::new(offset as u64))
    } else {
        first.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// Same as `checked_roll_date` but saturates at the first or last representable date
///
/// # Arguments
///
/// * 'year' - the year
/// * 'month0' - zero based month, may be out of range
/// * 'day' - one based day of month, may be out of range
pub fn roll_date(year: i32, month0: i32, day: i32) -> NaiveDate {
    checked_roll_date(year, month0, day).unwrap_or_else(|| {
        // Only reachable hundreds of thousands of years out, a rough day count gives the direction
        if year as i64 * 365 + month0 as i64 * 30 + day as i64 > 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        }
    })
}

/// Adds a number of calendar months to a date, clamping the day to the target month
///
/// # Arguments
///
/// * 'date' - the date to shift
/// * 'months' - months to add, may be negative
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    checked_add_months(date, months).unwrap_or(date)
}

/// Adds a number of calendar months to a date, None if the result is not representable
///
/// # Arguments
///
/// * 'date' - the date to shift
/// * 'months' - months to add, may be negative
pub fn checked_add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

/// Adds a number of days to a date, staying put if the result is not representable
///
/// # Arguments
///
/// * 'date' - the date to shift
/// * 'days' - days to add, may be negative
pub fn add_days(date: NaiveDate, days: i32) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs() as u64))
    };
    shifted.unwrap_or(date)
}

/// Returns the number of days in the given month
///
/// # Arguments
///
/// * 'year' - the year
/// * 'month0' - zero based month, may be out of range
pub fn days_in_month(year: i32, month0: i32) -> u32 {
    let first = roll_date(year, month0, 1);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        // December of the last representable year
        None => 31,
    }
}

/// Resolves a local wall clock time in the given zone to a UTC instant.
///
/// Ambiguous times (DST fall back) resolve to the earliest instant, times inside a
/// spring forward gap resolve to the first instant after the gap.
///
/// # Arguments
///
/// * 'tz' - the zone the wall clock time belongs to
/// * 'naive' - the local wall clock time
pub fn local_instant(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Gaps are at most a couple of hours, step until the clock exists again
            for minutes in (15..=180).step_by(15) {
                let Some(later) = naive.checked_add_signed(TimeDelta::minutes(minutes)) else {
                    break;
                };
                if let Some(dt) = tz.from_local_datetime(&later).earliest() {
                    return dt.with_timezone(&Utc);
                }
            }
            tz.from_utc_datetime(&naive).with_timezone(&Utc)
        }
    }
}

/// Returns the first instant of the given local date
///
/// # Arguments
///
/// * 'tz' - the dashboard zone
/// * 'date' - the local date
pub fn start_of_day(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    if date == NaiveDate::MIN {
        return DateTime::<Utc>::MIN_UTC;
    }
    local_instant(tz, date.and_time(NaiveTime::MIN))
}

/// Returns the first instant of the day after the given local date, or the last
/// representable instant if there is no such day
///
/// # Arguments
///
/// * 'tz' - the dashboard zone
/// * 'date' - the local date
pub fn start_of_next_day(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    start_of_day_or_max(tz, date.succ_opt())
}

/// Returns the first instant of the given local date, or the last representable
/// instant if the date does not exist
///
/// # Arguments
///
/// * 'tz' - the dashboard zone
/// * 'date' - the local date, if representable
pub fn start_of_day_or_max(tz: &Tz, date: Option<NaiveDate>) -> DateTime<Utc> {
    date.map_or(DateTime::<Utc>::MAX_UTC, |d| start_of_day(tz, d))
}

/// Returns the local date of an instant
///
/// # Arguments
///
/// * 'tz' - the dashboard zone
/// * 'date_time' - the instant
pub fn local_date(tz: &Tz, date_time: DateTime<Utc>) -> NaiveDate {
    date_time.with_timezone(tz).date_naive()
}

/// Returns the instant just before the given one, used to turn an exclusive end into an
/// inclusive one
pub fn just_before(date_time: DateTime<Utc>) -> DateTime<Utc> {
    date_time.checked_sub_signed(TimeDelta::milliseconds(1)).unwrap_or(date_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Amsterdam;

    #[test]
    fn roll_date_rolls_over_months_and_days() {
        assert_eq!(roll_date(2022, 12, 1), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(roll_date(2022, -1, 1), NaiveDate::from_ymd_opt(2021, 12, 1).unwrap());
        assert_eq!(roll_date(2022, 2, 0), NaiveDate::from_ymd_opt(2022, 2, 28).unwrap());
        assert_eq!(roll_date(2022, 0, 32), NaiveDate::from_ymd_opt(2022, 2, 1).unwrap());
    }

    #[test]
    fn roll_date_saturates_at_calendar_limits() {
        assert_eq!(checked_roll_date(i32::MAX, 12, 1), None);
        assert_eq!(roll_date(i32::MAX, 12, 1), NaiveDate::MAX);
        assert_eq!(roll_date(i32::MIN, -12, 1), NaiveDate::MIN);
        assert_eq!(roll_date(2022, 0, i32::MAX), NaiveDate::MAX);
        assert_eq!(roll_date(2022, 0, i32::MIN), NaiveDate::MIN);
        assert_eq!(roll_date(NaiveDate::MAX.year(), 11, 32), NaiveDate::MAX);
    }

    #[test]
    fn add_days_stays_put_past_the_last_date() {
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(add_days(NaiveDate::MIN, -1), NaiveDate::MIN);
        assert_eq!(add_days(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(), 1), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn bounds_at_calendar_limits_do_not_overflow() {
        assert_eq!(start_of_next_day(&Amsterdam, NaiveDate::MAX), DateTime::<Utc>::MAX_UTC);
        assert_eq!(start_of_day(&Amsterdam, NaiveDate::MIN), DateTime::<Utc>::MIN_UTC);
        assert_eq!(just_before(DateTime::<Utc>::MIN_UTC), DateTime::<Utc>::MIN_UTC);
        assert_eq!(days_in_month(NaiveDate::MAX.year(), 11), 31);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2022, 1), 28);
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2022, 11), 31);
    }

    #[test]
    fn local_instant_resolves_gap_and_overlap() {
        let gap = NaiveDate::from_ymd_opt(2022, 3, 27).unwrap().and_hms_opt(2, 30, 0).unwrap();
        let resolved = local_instant(&Amsterdam, gap);
        assert_eq!(resolved, Utc.with_ymd_and_hms(2022, 3, 27, 1, 0, 0).unwrap());

        let overlap = NaiveDate::from_ymd_opt(2022, 10, 30).unwrap().and_hms_opt(2, 30, 0).unwrap();
        let resolved = local_instant(&Amsterdam, overlap);
        assert_eq!(resolved, Utc.with_ymd_and_hms(2022, 10, 30, 0, 30, 0).unwrap());
    }

    #[test]
    fn start_of_day_is_local_midnight() {
        let date = NaiveDate::from_ymd_opt(2022, 7, 18).unwrap();
        assert_eq!(start_of_day(&Amsterdam, date), Utc.with_ymd_and_hms(2022, 7, 17, 22, 0, 0).unwrap());
    }
}
