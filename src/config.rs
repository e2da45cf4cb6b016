use std::fs;
use chrono_tz::Tz;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::merge::RETENTION_MINUTES;

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Dashboard {
    pub timezone: String,
    #[serde(default = "default_retention")]
    pub retention_minutes: i64,
}

#[derive(Deserialize)]
pub struct Files {
    pub rates_file: Option<String>,
    pub state_file: String,
}

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    pub dashboard: Dashboard,
    pub files: Files,
}

impl Config {
    /// Returns the dashboard time zone
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.dashboard.timezone.parse::<Tz>()
            .map_err(|e| ConfigError::Timezone(format!("{}: {}", self.dashboard.timezone, e)))
    }
}

fn default_retention() -> i64 {
    RETENTION_MINUTES
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    parse_config(&toml)
}

/// Parses configuration and validates the time zone
///
/// # Arguments
///
/// * 'toml' - the configuration document
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;
    config.tz()?;

    Ok(config)
}
