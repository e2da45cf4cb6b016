use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::warn;
use serde::{Deserialize, Serialize};
use crate::calendar::checked_roll_date;
use crate::errors::PeriodError;
use crate::period::{DayDescription, MonthDescription, PeriodDescription, YearDescription};

/// Tabs the dashboard can show
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    Period,
    Dashboard,
}

/// What the location bar points at
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub active_tab: ActiveTab,
    pub period_description: PeriodDescription,
}

impl Location {
    pub fn to_url(&self) -> String {
        match self.active_tab {
            ActiveTab::Dashboard => "/dashboard".to_string(),
            ActiveTab::Period => self.period_description.to_url(),
        }
    }
}

/// Decodes a location path into the active tab and selected period.
///
/// Paths look like `/period/{year|month|day}/<year>[/<month>[/<day>]]` with one based
/// month and day. Anything not recognized lands on today's day period.
///
/// # Arguments
///
/// * 'tz' - the dashboard zone
/// * 'path' - the location path
/// * 'now' - current time, used for the default period
pub fn parse_location(tz: Tz, path: &str, now: DateTime<Utc>) -> Location {
    let today = PeriodDescription::today(tz, now);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.first() {
        Some(&"dashboard") => Location { active_tab: ActiveTab::Dashboard, period_description: today },
        Some(&"period") => {
            let period_description = parse_period_segments(tz, &segments[1..]).unwrap_or_else(|e| {
                warn!("{}, falling back to today", e);
                today
            });
            Location { active_tab: ActiveTab::Period, period_description }
        },
        _ => Location { active_tab: ActiveTab::Period, period_description: today },
    }
}

/// Parses the segments following `/period`
///
/// # Arguments
///
/// * 'tz' - the dashboard zone
/// * 'segments' - kind followed by the numeric components
fn parse_period_segments(tz: Tz, segments: &[&str]) -> Result<PeriodDescription, PeriodError> {
    let path = || PeriodError::Path(segments.join("/"));

    let numbers = segments.iter()
        .skip(1)
        .map(|s| s.parse::<i32>())
        .collect::<Result<Vec<i32>, _>>()
        .map_err(|_| path())?;

    // Fields may roll over, but the date they land on must exist
    let representable = |year: i32, month0: i32, day: i32| checked_roll_date(year, month0, day).is_some();

    match (segments.first(), numbers.as_slice()) {
        (Some(&"year"), [year]) if representable(*year, 0, 1) =>
            Ok(YearDescription::new(tz, *year).into()),
        (Some(&"month"), [year, month]) => match month.checked_sub(1) {
            Some(month0) if representable(*year, month0, 1) => Ok(MonthDescription::new(tz, *year, month0).into()),
            _ => Err(path()),
        },
        (Some(&"day"), [year, month, day]) => match month.checked_sub(1) {
            Some(month0) if representable(*year, month0, *day) => Ok(DayDescription::new(tz, *year, month0, *day).into()),
            _ => Err(path()),
        },
        _ => Err(path()),
    }
}
