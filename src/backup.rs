use std::fs;
use std::path::Path;
use chrono_tz::Tz;
use log::info;
use serde::{Deserialize, Serialize};
use crate::errors::{BackupError, PeriodError};
use crate::period::{DayDescription, MonthDescription, PeriodDescription, YearDescription};

/// Storable form of a selected period, month is zero based
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum StoredPeriod {
    DayDescription { year: i32, month: i32, day: i32 },
    MonthDescription { year: i32, month: i32 },
    YearDescription { year: i32 },
}

pub fn serialize_period_description(period: &PeriodDescription) -> StoredPeriod {
    match period {
        PeriodDescription::Day(p) => StoredPeriod::DayDescription { year: p.year, month: p.month, day: p.day },
        PeriodDescription::Month(p) => StoredPeriod::MonthDescription { year: p.year, month: p.month },
        PeriodDescription::Year(p) => StoredPeriod::YearDescription { year: p.year },
    }
}

/// Restores a period description from its stored form
///
/// # Arguments
///
/// * 'tz' - the dashboard zone
/// * 'stored' - the stored period
pub fn deserialize_period_description(tz: Tz, stored: StoredPeriod) -> PeriodDescription {
    match stored {
        StoredPeriod::DayDescription { year, month, day } => DayDescription::new(tz, year, month, day).into(),
        StoredPeriod::MonthDescription { year, month } => MonthDescription::new(tz, year, month).into(),
        StoredPeriod::YearDescription { year } => YearDescription::new(tz, year).into(),
    }
}

pub fn period_to_json(period: &PeriodDescription) -> Result<String, PeriodError> {
    Ok(serde_json::to_string(&serialize_period_description(period))?)
}

pub fn period_from_json(tz: Tz, json: &str) -> Result<PeriodDescription, PeriodError> {
    let stored: StoredPeriod = serde_json::from_str(json)?;
    Ok(deserialize_period_description(tz, stored))
}

/// Saves the selected period to file
///
/// # Arguments
///
/// * 'state_file' - the file to save to
/// * 'period' - the selected period
pub fn save_selected_period(state_file: &str, period: &PeriodDescription) -> Result<(), BackupError> {
    let json = serde_json::to_string_pretty(&serialize_period_description(period))?;
    fs::write(state_file, json)?;

    Ok(())
}

/// Loads the selected period from file, if any was saved
///
/// # Arguments
///
/// * 'tz' - the dashboard zone
/// * 'state_file' - the file to load from
pub fn load_selected_period(tz: Tz, state_file: &str) -> Result<Option<PeriodDescription>, BackupError> {
    if Path::new(state_file).exists() {
        let json = fs::read_to_string(state_file)?;
        let stored: StoredPeriod = serde_json::from_str(&json)?;
        let period = deserialize_period_description(tz, stored);
        info!("restored selected period {}", period.to_url());

        Ok(Some(period))
    } else {
        Ok(None)
    }
}
