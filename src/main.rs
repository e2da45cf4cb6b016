use std::env;
use std::fs;
use anyhow::{bail, Result};
use chrono::{TimeDelta, Utc};
use chrono_tz::Tz;
use log::{info, warn};
use meterdash::backup::{load_selected_period, save_selected_period};
use meterdash::config::{load_config, Config};
use meterdash::location::parse_location;
use meterdash::logging::setup_logger;
use meterdash::merge::merge_new_with_old_values;
use meterdash::padding::pad_period;
use meterdash::period::PeriodDescription;
use meterdash::price::{Category, PriceCalculator};
use meterdash::readings::{parse_rows, ValueWithTimestamp};

const USAGE: &str = "usage: meterdash period <path> <readings.json> <gas|stroom|water>\n       meterdash live <existing.json> <new.json>";

fn main() -> Result<()> {
    let config_file = env::var("CONFIG_FILE").unwrap_or("config/config.toml".to_string());
    let config = load_config(&config_file)?;
    let _handle = setup_logger(&config.general)?;
    let tz = config.tz()?;

    info!("meterdash version: {}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<&str>>().as_slice() {
        ["period", path, readings_file, category] => show_period(&config, tz, path, readings_file, category),
        ["live", existing_file, new_file] => show_live(&config, tz, existing_file, new_file),
        _ => bail!(USAGE),
    }
}

/// Prints the padded readings and costs for a period, falling back to the last
/// selected period when the path is empty
fn show_period(config: &Config, tz: Tz, path: &str, readings_file: &str, category: &str) -> Result<()> {
    let now = Utc::now();
    let category: Category = category.parse()?;

    let period = if path.is_empty() {
        load_selected_period(tz, &config.files.state_file)?
            .unwrap_or(PeriodDescription::today(tz, now))
    } else {
        parse_location(tz, path, now).period_description
    };
    if !period.is_valid() {
        warn!("period {} is not valid, showing it anyway", period.to_url());
    }
    if !period.has_measurements(now) {
        warn!("no measurements exist for {}", period);
    }

    let readings = read_readings(readings_file, tz)?;
    let within: Vec<ValueWithTimestamp> = readings.into_iter()
        .filter(|r| r.timestamp >= period.start_of_period() && r.timestamp <= period.end_of_period())
        .collect();

    let calculator = match &config.files.rates_file {
        Some(rates_file) => PriceCalculator::from_file(tz, rates_file)?,
        None => PriceCalculator::new(tz)?,
    };

    println!("{}", period);
    for slot in pad_period(&within, &period) {
        println!("{} {}", slot, calculator.costs_for(slot.value, category, slot.timestamp));
    }
    println!("{}", calculator.cost_summary(&within, category));

    save_selected_period(&config.files.state_file, &period)?;

    Ok(())
}

/// Prints the result of merging a new live batch into existing readings
fn show_live(config: &Config, tz: Tz, existing_file: &str, new_file: &str) -> Result<()> {
    let existing = read_readings(existing_file, tz)?;
    let new_values = read_readings(new_file, tz)?;
    let cutoff = Utc::now() - TimeDelta::minutes(config.dashboard.retention_minutes);

    for reading in merge_new_with_old_values(&new_values, &existing, cutoff) {
        println!("{}", reading);
    }

    Ok(())
}

fn read_readings(file: &str, tz: Tz) -> Result<Vec<ValueWithTimestamp>> {
    let json = fs::read_to_string(file)?;
    Ok(parse_rows(&json, &tz)?)
}
