use chrono::{DateTime, Datelike, Days, TimeDelta, Utc};
use chrono_tz::Tz;
use crate::calendar::{add_months, checked_add_months, days_in_month, just_before, local_date, roll_date, start_of_day, start_of_day_or_max};
use crate::period::day::DayDescription;
use crate::period::year::YearDescription;

/// A calendar month, with one data point per day
#[derive(Clone, Copy, Debug)]
pub struct MonthDescription {
    tz: Tz,
    pub year: i32,
    /// Zero based, January is 0
    pub month: i32,
}

impl MonthDescription {
    pub fn new(tz: Tz, year: i32, month: i32) -> MonthDescription {
        MonthDescription { tz, year, month }
    }

    /// Returns the month containing the given instant
    ///
    /// # Arguments
    ///
    /// * 'tz' - the dashboard zone
    /// * 'now' - current time
    pub fn this_month(tz: Tz, now: DateTime<Utc>) -> MonthDescription {
        let local = local_date(&tz, now);
        MonthDescription::new(tz, local.year(), local.month0() as i32)
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn to_date(&self) -> DateTime<Utc> {
        self.start_of_period()
    }

    pub fn start_of_period(&self) -> DateTime<Utc> {
        start_of_day(&self.tz, roll_date(self.year, self.month, 1))
    }

    pub fn end_of_period(&self) -> DateTime<Utc> {
        let next_month = checked_add_months(roll_date(self.year, self.month, 1), 1);
        just_before(start_of_day_or_max(&self.tz, next_month))
    }

    pub fn previous(&self) -> MonthDescription {
        self.shifted(-1)
    }

    pub fn next(&self) -> MonthDescription {
        self.shifted(1)
    }

    fn shifted(&self, months: i32) -> MonthDescription {
        let date = add_months(roll_date(self.year, self.month, 1), months);
        MonthDescription::new(self.tz, date.year(), date.month0() as i32)
    }

    pub fn up(&self) -> YearDescription {
        YearDescription::new(self.tz, self.year)
    }

    /// Returns the day of this month containing the given instant
    ///
    /// # Arguments
    ///
    /// * 'date' - instant to drill down to
    pub fn at_date(&self, date: DateTime<Utc>) -> DayDescription {
        let local = local_date(&self.tz, date);
        DayDescription::new(self.tz, local.year(), local.month0() as i32, local.day() as i32)
    }

    /// Returns the n:th day of this month, the first day being 1
    ///
    /// # Arguments
    ///
    /// * 'index' - one based day index
    pub fn at_index(&self, index: u32) -> DayDescription {
        DayDescription::new(self.tz, self.year, self.month, i32::try_from(index).unwrap_or(i32::MAX))
    }

    /// Maps an instant to the start of its local day
    ///
    /// # Arguments
    ///
    /// * 'date' - the instant to normalize
    pub fn normalize(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        start_of_day(&self.tz, local_date(&self.tz, date))
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Returns the start of every day in the month
    pub fn expected_domain_values(&self) -> Vec<DateTime<Utc>> {
        let first = roll_date(self.year, self.month, 1);
        (0..self.days_in_month() as u64)
            .filter_map(|d| first.checked_add_days(Days::new(d)))
            .map(|date| start_of_day(&self.tz, date))
            .collect()
    }

    /// Returns every other day of the month, starting with the first
    pub fn chart_ticks(&self) -> Vec<DateTime<Utc>> {
        self.expected_domain_values().into_iter().step_by(2).collect()
    }

    pub fn shift_half_tick(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        date.checked_sub_signed(TimeDelta::hours(12)).unwrap_or(date)
    }

    pub fn is_valid(&self) -> bool {
        (0..12).contains(&self.month) && self.up().is_valid()
    }

    pub fn to_url(&self) -> String {
        format!("/period/month/{}/{:02}", self.year, self.month as i64 + 1)
    }

    pub fn to_title(&self) -> String {
        format!("{}", roll_date(self.year, self.month, 1).format("%B %Y"))
    }

    pub fn to_short_title(&self) -> String {
        format!("{}", roll_date(self.year, self.month, 1).format("%b"))
    }
}

impl PartialEq for MonthDescription {
    fn eq(&self, other: &Self) -> bool {
        self.start_of_period() == other.start_of_period()
    }
}

impl Eq for MonthDescription {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::Europe::Amsterdam;

    #[test]
    fn previous_rolls_over_to_december() {
        let january = MonthDescription::new(Amsterdam, 2022, 0);
        let december = january.previous();
        assert_eq!((december.year, december.month), (2021, 11));
        assert_eq!(december.next(), january);
    }

    #[test]
    fn validity_checks_month_range() {
        assert!(MonthDescription::new(Amsterdam, 2022, 11).is_valid());
        assert!(!MonthDescription::new(Amsterdam, 2022, 13).is_valid());
        assert!(!MonthDescription::new(Amsterdam, 2022, -1).is_valid());
    }

    #[test]
    fn end_of_period_is_last_millisecond_of_month() {
        let month = MonthDescription::new(Amsterdam, 2022, 1);
        let expected = Utc.with_ymd_and_hms(2022, 2, 28, 23, 0, 0).unwrap() - TimeDelta::milliseconds(1);
        assert_eq!(month.end_of_period(), expected);
    }

    #[test]
    fn chart_ticks_use_two_day_stride() {
        let month = MonthDescription::new(Amsterdam, 2022, 6);
        let ticks = month.chart_ticks();
        assert_eq!(ticks.len(), 16);
        assert_eq!(ticks[1], Utc.with_ymd_and_hms(2022, 7, 2, 22, 0, 0).unwrap());
    }

    #[test]
    fn expected_domain_values_cross_dst_change() {
        let month = MonthDescription::new(Amsterdam, 2022, 9);
        let values = month.expected_domain_values();
        assert_eq!(values.len(), 31);
        assert_eq!(values[29], Utc.with_ymd_and_hms(2022, 10, 29, 22, 0, 0).unwrap());
        assert_eq!(values[30], Utc.with_ymd_and_hms(2022, 10, 30, 23, 0, 0).unwrap());
    }

    #[test]
    fn shift_half_tick_is_half_a_day() {
        let month = MonthDescription::new(Amsterdam, 2022, 6);
        let start = month.start_of_period();
        assert_eq!(month.shift_half_tick(start), start - TimeDelta::hours(12));
    }

    #[test]
    fn field_extremes_do_not_overflow() {
        let month = MonthDescription::new(Amsterdam, 2022, i32::MAX);
        assert!(!month.is_valid());
        assert!(month.start_of_period() <= month.end_of_period());
        assert_eq!(month.to_url(), format!("/period/month/2022/{}", i32::MAX as i64 + 1));

        let last = MonthDescription::new(Amsterdam, i32::MAX, 11).next();
        assert_eq!((last.year, last.month), (NaiveDate::MAX.year(), 11));
        let first = MonthDescription::new(Amsterdam, i32::MIN, i32::MIN);
        assert_eq!(first.previous().start_of_period(), first.start_of_period());
        assert_eq!(MonthDescription::new(Amsterdam, 2022, 0).at_index(u32::MAX).day, i32::MAX);
    }

    #[test]
    fn titles() {
        let month = MonthDescription::new(Amsterdam, 2022, 6);
        assert_eq!(month.to_title(), "July 2022");
        assert_eq!(month.to_url(), "/period/month/2022/07");
    }
}
