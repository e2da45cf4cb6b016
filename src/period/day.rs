use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use crate::calendar;
use crate::calendar::{add_days, days_in_month, just_before, local_date, roll_date, start_of_day};
use crate::period::month::MonthDescription;

/// A calendar day, with one data point per hour. Depending on DST a day holds 23, 24 or 25 hours.
#[derive(Clone, Copy, Debug)]
pub struct DayDescription {
    tz: Tz,
    pub year: i32,
    /// Zero based, January is 0
    pub month: i32,
    /// One based day of month
    pub day: i32,
}

impl DayDescription {
    pub fn new(tz: Tz, year: i32, month: i32, day: i32) -> DayDescription {
        DayDescription { tz, year, month, day }
    }

    /// Returns the day containing the given instant
    ///
    /// # Arguments
    ///
    /// * 'tz' - the dashboard zone
    /// * 'now' - current time
    pub fn today(tz: Tz, now: DateTime<Utc>) -> DayDescription {
        let local = local_date(&tz, now);
        DayDescription::new(tz, local.year(), local.month0() as i32, local.day() as i32)
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn to_date(&self) -> DateTime<Utc> {
        self.start_of_period()
    }

    pub fn start_of_period(&self) -> DateTime<Utc> {
        start_of_day(&self.tz, roll_date(self.year, self.month, self.day))
    }

    pub fn end_of_period(&self) -> DateTime<Utc> {
        just_before(self.start_of_next_day())
    }

    fn start_of_next_day(&self) -> DateTime<Utc> {
        calendar::start_of_next_day(&self.tz, roll_date(self.year, self.month, self.day))
    }

    pub fn previous(&self) -> DayDescription {
        self.shifted(-1)
    }

    pub fn next(&self) -> DayDescription {
        self.shifted(1)
    }

    fn shifted(&self, days: i32) -> DayDescription {
        let date = add_days(roll_date(self.year, self.month, self.day), days);
        DayDescription::new(self.tz, date.year(), date.month0() as i32, date.day() as i32)
    }

    pub fn up(&self) -> MonthDescription {
        MonthDescription::new(self.tz, self.year, self.month)
    }

    /// Maps an instant to the start of its UTC hour.
    ///
    /// The hour is taken from the UTC fields so that the two local 02:00 hours of a
    /// DST fall back day end up in separate slots.
    ///
    /// # Arguments
    ///
    /// * 'date' - the instant to normalize
    pub fn normalize(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(date.year(), date.month(), date.day(), date.hour(), 0, 0)
            .single()
            .unwrap_or(date)
    }

    /// Returns the start of every real clock hour of the day
    pub fn expected_domain_values(&self) -> Vec<DateTime<Utc>> {
        let end = self.start_of_next_day();
        let mut hours: Vec<DateTime<Utc>> = Vec::with_capacity(25);
        let mut hour = self.start_of_period();
        while hour < end {
            hours.push(hour);
            let Some(next) = hour.checked_add_signed(TimeDelta::hours(1)) else {
                break;
            };
            hour = next;
        }
        hours
    }

    /// Returns every other hour of the day, starting at midnight
    pub fn chart_ticks(&self) -> Vec<DateTime<Utc>> {
        self.expected_domain_values().into_iter().step_by(2).collect()
    }

    pub fn shift_half_tick(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        date.checked_sub_signed(TimeDelta::minutes(30)).unwrap_or(date)
    }

    pub fn is_valid(&self) -> bool {
        self.day >= 1
            && self.day <= days_in_month(self.year, self.month) as i32
            && self.up().is_valid()
    }

    pub fn to_url(&self) -> String {
        format!("/period/day/{}/{:02}/{:02}", self.year, self.month as i64 + 1, self.day)
    }

    pub fn to_title(&self) -> String {
        format!("{}", roll_date(self.year, self.month, self.day).format("%A %-d %B %Y"))
    }

    pub fn to_short_title(&self) -> String {
        format!("{}", roll_date(self.year, self.month, self.day).format("%d-%m"))
    }
}

impl PartialEq for DayDescription {
    fn eq(&self, other: &Self) -> bool {
        self.start_of_period() == other.start_of_period()
    }
}

impl Eq for DayDescription {}
