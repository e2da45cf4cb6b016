use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use chrono_tz::Tz;
use log::warn;
use crate::period::day::DayDescription;

/// The hour ending at a fixed anchor instant, with one data point per minute
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HourDescription {
    tz: Tz,
    anchor: DateTime<Utc>,
}

impl HourDescription {
    pub fn new(tz: Tz, anchor: DateTime<Utc>) -> HourDescription {
        HourDescription { tz, anchor }
    }

    pub fn to_date(&self) -> DateTime<Utc> {
        self.anchor
    }

    pub fn start_of_period(&self) -> DateTime<Utc> {
        self.anchor - TimeDelta::hours(1)
    }

    pub fn end_of_period(&self) -> DateTime<Utc> {
        self.anchor
    }

    /// Not supported for hour periods, logs a warning and stays put
    pub fn previous(&self) -> HourDescription {
        warn!("previous() is not supported for hour periods, staying at {}", self.anchor);
        *self
    }

    /// Not supported for hour periods, logs a warning and stays put
    pub fn next(&self) -> HourDescription {
        warn!("next() is not supported for hour periods, staying at {}", self.anchor);
        *self
    }

    /// Returns the day the hour starts in
    pub fn up(&self) -> DayDescription {
        DayDescription::today(self.tz, self.start_of_period())
    }

    pub fn normalize(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        date.duration_trunc(TimeDelta::minutes(1)).unwrap_or(date)
    }

    pub fn is_valid(&self) -> bool {
        true
    }

    pub fn to_title(&self) -> String {
        let start = self.start_of_period().with_timezone(&self.tz);
        let end = self.anchor.with_timezone(&self.tz);
        format!("{} - {}", start.format("%-d %B %Y %H:%M"), end.format("%H:%M"))
    }

    pub fn to_short_title(&self) -> String {
        format!("{}", self.anchor.with_timezone(&self.tz).format("%H:%M"))
    }
}

/// The rolling hour leading up to now. Its bounds move with the clock, so every
/// operation takes the current time.
#[derive(Clone, Copy, Debug)]
pub struct LastHourDescription {
    tz: Tz,
}

impl LastHourDescription {
    pub fn new(tz: Tz) -> LastHourDescription {
        LastHourDescription { tz }
    }

    pub fn to_date(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now
    }

    pub fn start_of_period(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - TimeDelta::hours(1)
    }

    pub fn end_of_period(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now
    }

    /// Freezes the rolling hour at the given time
    ///
    /// # Arguments
    ///
    /// * 'now' - current time
    pub fn at(&self, now: DateTime<Utc>) -> HourDescription {
        HourDescription::new(self.tz, now)
    }

    pub fn normalize(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        date.duration_trunc(TimeDelta::minutes(1)).unwrap_or(date)
    }

    pub fn is_valid(&self) -> bool {
        true
    }

    pub fn to_title(&self) -> String {
        "Last hour".to_string()
    }
}

/// A single minute, only used for labelling live readings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinuteDescription {
    tz: Tz,
    anchor: DateTime<Utc>,
}

impl MinuteDescription {
    pub fn new(tz: Tz, anchor: DateTime<Utc>) -> MinuteDescription {
        MinuteDescription { tz, anchor }
    }

    pub fn is_valid(&self) -> bool {
        true
    }

    pub fn to_short_title(&self) -> String {
        format!("{}", self.anchor.with_timezone(&self.tz).format("%H:%M"))
    }
}
