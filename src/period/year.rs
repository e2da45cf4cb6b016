use chrono::{DateTime, Datelike, TimeDelta, Utc};
use chrono_tz::Tz;
use crate::calendar::{checked_add_months, just_before, local_date, roll_date, start_of_day, start_of_day_or_max};
use crate::period::month::MonthDescription;

/// A calendar year, with one data point per month
#[derive(Clone, Copy, Debug)]
pub struct YearDescription {
    tz: Tz,
    pub year: i32,
}

impl YearDescription {
    pub fn new(tz: Tz, year: i32) -> YearDescription {
        YearDescription { tz, year }
    }

    /// Returns the year containing the given instant
    ///
    /// # Arguments
    ///
    /// * 'tz' - the dashboard zone
    /// * 'now' - current time
    pub fn this_year(tz: Tz, now: DateTime<Utc>) -> YearDescription {
        YearDescription::new(tz, local_date(&tz, now).year())
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn to_date(&self) -> DateTime<Utc> {
        self.start_of_period()
    }

    pub fn start_of_period(&self) -> DateTime<Utc> {
        start_of_day(&self.tz, roll_date(self.year, 0, 1))
    }

    pub fn end_of_period(&self) -> DateTime<Utc> {
        let next_year = checked_add_months(roll_date(self.year, 0, 1), 12);
        just_before(start_of_day_or_max(&self.tz, next_year))
    }

    pub fn previous(&self) -> YearDescription {
        YearDescription::new(self.tz, self.year.saturating_sub(1))
    }

    pub fn next(&self) -> YearDescription {
        YearDescription::new(self.tz, self.year.saturating_add(1))
    }

    /// Returns the month of this year containing the given instant
    ///
    /// # Arguments
    ///
    /// * 'date' - instant to drill down to
    pub fn at_date(&self, date: DateTime<Utc>) -> MonthDescription {
        let local = local_date(&self.tz, date);
        MonthDescription::new(self.tz, local.year(), local.month0() as i32)
    }

    /// Returns the n:th month of this year, January being 1
    ///
    /// # Arguments
    ///
    /// * 'index' - one based month index
    pub fn at_index(&self, index: u32) -> MonthDescription {
        MonthDescription::new(self.tz, self.year, i32::try_from(index).map_or(i32::MAX, |i| i - 1))
    }

    /// Maps an instant to the start of its month
    ///
    /// # Arguments
    ///
    /// * 'date' - the instant to normalize
    pub fn normalize(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        let local = local_date(&self.tz, date);
        start_of_day(&self.tz, roll_date(local.year(), local.month0() as i32, 1))
    }

    /// Returns the start of every month in the year
    pub fn expected_domain_values(&self) -> Vec<DateTime<Utc>> {
        let first = roll_date(self.year, 0, 1);
        (0..12)
            .filter_map(|m| checked_add_months(first, m))
            .map(|date| start_of_day(&self.tz, date))
            .collect()
    }

    pub fn chart_ticks(&self) -> Vec<DateTime<Utc>> {
        self.expected_domain_values()
    }

    pub fn shift_half_tick(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        date.checked_sub_signed(TimeDelta::days(15)).unwrap_or(date)
    }

    pub fn is_valid(&self) -> bool {
        true
    }

    pub fn to_url(&self) -> String {
        format!("/period/year/{}", self.year)
    }

    pub fn to_title(&self) -> String {
        format!("{}", self.year)
    }

    pub fn to_short_title(&self) -> String {
        self.to_title()
    }
}

impl PartialEq for YearDescription {
    fn eq(&self, other: &Self) -> bool {
        self.start_of_period() == other.start_of_period()
    }
}

impl Eq for YearDescription {}
