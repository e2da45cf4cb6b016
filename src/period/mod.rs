pub mod year;
pub mod month;
pub mod day;
pub mod hour;

use std::fmt;
use std::fmt::Formatter;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use crate::calendar::start_of_day;
pub use crate::period::day::DayDescription;
pub use crate::period::hour::{HourDescription, LastHourDescription, MinuteDescription};
pub use crate::period::month::MonthDescription;
pub use crate::period::year::YearDescription;

/// Returns the local date of the first measurement ever stored, periods ending before
/// it have nothing to display
pub fn first_measurement() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 11, 12).unwrap_or(NaiveDate::MIN)
}

/// Kind of reporting period
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PeriodKind::Year   => write!(f, "year"),
            PeriodKind::Month  => write!(f, "month"),
            PeriodKind::Day    => write!(f, "day"),
            PeriodKind::Hour   => write!(f, "hour"),
            PeriodKind::Minute => write!(f, "minute"),
        }
    }
}

/// Granularity of one data point within a period
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSize {
    Month,
    Day,
    Hour,
    Minute,
}

/// A navigable calendar period as selected in the dashboard
#[derive(Clone, Copy, Debug)]
pub enum PeriodDescription {
    Year(YearDescription),
    Month(MonthDescription),
    Day(DayDescription),
}

macro_rules! each_period {
    ($self:ident, $p:ident => $body:expr) => {
        match $self {
            PeriodDescription::Year($p) => $body,
            PeriodDescription::Month($p) => $body,
            PeriodDescription::Day($p) => $body,
        }
    };
}

impl PeriodDescription {
    /// Returns today as a day period
    ///
    /// # Arguments
    ///
    /// * 'tz' - the dashboard zone
    /// * 'now' - current time
    pub fn today(tz: Tz, now: DateTime<Utc>) -> PeriodDescription {
        PeriodDescription::Day(DayDescription::today(tz, now))
    }

    pub fn this_month(tz: Tz, now: DateTime<Utc>) -> PeriodDescription {
        PeriodDescription::Month(MonthDescription::this_month(tz, now))
    }

    pub fn this_year(tz: Tz, now: DateTime<Utc>) -> PeriodDescription {
        PeriodDescription::Year(YearDescription::this_year(tz, now))
    }

    /// Returns the period of the given kind containing the given instant.
    /// Hour and minute kinds fall back to the containing day.
    ///
    /// # Arguments
    ///
    /// * 'tz' - the dashboard zone
    /// * 'kind' - the kind of period to create
    /// * 'date' - instant inside the period
    pub fn from_date(tz: Tz, kind: PeriodKind, date: DateTime<Utc>) -> PeriodDescription {
        match kind {
            PeriodKind::Year => PeriodDescription::this_year(tz, date),
            PeriodKind::Month => PeriodDescription::this_month(tz, date),
            PeriodKind::Day | PeriodKind::Hour | PeriodKind::Minute => PeriodDescription::today(tz, date),
        }
    }

    pub fn period(&self) -> PeriodKind {
        match self {
            PeriodDescription::Year(_) => PeriodKind::Year,
            PeriodDescription::Month(_) => PeriodKind::Month,
            PeriodDescription::Day(_) => PeriodKind::Day,
        }
    }

    pub fn unit_size(&self) -> UnitSize {
        match self {
            PeriodDescription::Year(_) => UnitSize::Month,
            PeriodDescription::Month(_) => UnitSize::Day,
            PeriodDescription::Day(_) => UnitSize::Hour,
        }
    }

    pub fn tz(&self) -> Tz {
        each_period!(self, p => p.tz())
    }

    pub fn to_date(&self) -> DateTime<Utc> {
        each_period!(self, p => p.to_date())
    }

    pub fn start_of_period(&self) -> DateTime<Utc> {
        each_period!(self, p => p.start_of_period())
    }

    pub fn end_of_period(&self) -> DateTime<Utc> {
        each_period!(self, p => p.end_of_period())
    }

    pub fn previous(&self) -> PeriodDescription {
        match self {
            PeriodDescription::Year(p) => PeriodDescription::Year(p.previous()),
            PeriodDescription::Month(p) => PeriodDescription::Month(p.previous()),
            PeriodDescription::Day(p) => PeriodDescription::Day(p.previous()),
        }
    }

    pub fn next(&self) -> PeriodDescription {
        match self {
            PeriodDescription::Year(p) => PeriodDescription::Year(p.next()),
            PeriodDescription::Month(p) => PeriodDescription::Month(p.next()),
            PeriodDescription::Day(p) => PeriodDescription::Day(p.next()),
        }
    }

    /// Returns the next coarser period, a year has no parent
    pub fn up(&self) -> Option<PeriodDescription> {
        match self {
            PeriodDescription::Year(_) => None,
            PeriodDescription::Month(p) => Some(PeriodDescription::Year(p.up())),
            PeriodDescription::Day(p) => Some(PeriodDescription::Month(p.up())),
        }
    }

    /// Returns the next finer period containing the given instant. Days do not drill
    /// down any further and return themselves.
    ///
    /// # Arguments
    ///
    /// * 'date' - instant to drill down to
    pub fn at_date(&self, date: DateTime<Utc>) -> PeriodDescription {
        match self {
            PeriodDescription::Year(p) => PeriodDescription::Month(p.at_date(date)),
            PeriodDescription::Month(p) => PeriodDescription::Day(p.at_date(date)),
            PeriodDescription::Day(_) => *self,
        }
    }

    /// Returns the n:th finer period, e.g. the n:th bar clicked in a bar chart.
    /// Days return themselves.
    ///
    /// # Arguments
    ///
    /// * 'index' - one based index of the child period
    pub fn at_index(&self, index: u32) -> PeriodDescription {
        match self {
            PeriodDescription::Year(p) => PeriodDescription::Month(p.at_index(index)),
            PeriodDescription::Month(p) => PeriodDescription::Day(p.at_index(index)),
            PeriodDescription::Day(_) => *self,
        }
    }

    /// Maps an instant to its slot on the period's grid
    ///
    /// # Arguments
    ///
    /// * 'date' - the instant to normalize
    pub fn normalize(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        each_period!(self, p => p.normalize(date))
    }

    pub fn expected_domain_values(&self) -> Vec<DateTime<Utc>> {
        each_period!(self, p => p.expected_domain_values())
    }

    pub fn chart_ticks(&self) -> Vec<DateTime<Utc>> {
        each_period!(self, p => p.chart_ticks())
    }

    /// Shifts a boundary backwards by half a grid unit, for axis tick placement only
    ///
    /// # Arguments
    ///
    /// * 'date' - the boundary to shift
    pub fn shift_half_tick(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        each_period!(self, p => p.shift_half_tick(date))
    }

    pub fn is_valid(&self) -> bool {
        each_period!(self, p => p.is_valid())
    }

    pub fn before_first_measurement(&self) -> bool {
        self.end_of_period() < start_of_day(&self.tz(), first_measurement())
    }

    pub fn is_in_future(&self, now: DateTime<Utc>) -> bool {
        self.start_of_period() > now
    }

    /// Returns true if the period overlaps the span where measurements exist
    ///
    /// # Arguments
    ///
    /// * 'now' - current time
    pub fn has_measurements(&self, now: DateTime<Utc>) -> bool {
        !self.before_first_measurement() && !self.is_in_future(now)
    }

    pub fn to_url(&self) -> String {
        each_period!(self, p => p.to_url())
    }

    pub fn to_title(&self) -> String {
        each_period!(self, p => p.to_title())
    }

    pub fn to_short_title(&self) -> String {
        each_period!(self, p => p.to_short_title())
    }
}

impl PartialEq for PeriodDescription {
    fn eq(&self, other: &Self) -> bool {
        self.period() == other.period() && self.start_of_period() == other.start_of_period()
    }
}

impl Eq for PeriodDescription {}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for PeriodDescription {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {}", self.period(), self.to_title())
    }
}

impl From<YearDescription> for PeriodDescription {
    fn from(p: YearDescription) -> Self { PeriodDescription::Year(p) }
}
impl From<MonthDescription> for PeriodDescription {
    fn from(p: MonthDescription) -> Self { PeriodDescription::Month(p) }
}
impl From<DayDescription> for PeriodDescription {
    fn from(p: DayDescription) -> Self { PeriodDescription::Day(p) }
}
