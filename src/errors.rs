use std::fmt;
use std::fmt::Formatter;
use chrono::NaiveDate;
use thiserror::Error;
use crate::price::Category;

/// Error depicting errors that occur while loading the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ConfigError::Io: {0}")]
    Io(#[from] std::io::Error),
    #[error("ConfigError::Document: {0}")]
    Document(#[from] toml::de::Error),
    #[error("ConfigError::Timezone: {0}")]
    Timezone(String),
    #[error("ConfigError::Rates: {0}")]
    Rates(String),
}

/// Error depicting errors that occur while setting up logging
#[derive(Error, Debug)]
#[error("LoggingError: {0}")]
pub struct LoggingError(pub String);
impl From<std::io::Error> for LoggingError {
    fn from(e: std::io::Error) -> Self { LoggingError(format!("log file error: {}", e)) }
}
impl From<log::SetLoggerError> for LoggingError {
    fn from(e: log::SetLoggerError) -> Self { LoggingError(e.to_string()) }
}

/// Error depicting errors when restoring a period description
#[derive(Error, Debug)]
pub enum PeriodError {
    #[error("PeriodError::Document: {0}")]
    Document(#[from] serde_json::Error),
    #[error("PeriodError::Path: unable to parse '{0}'")]
    Path(String),
}

/// Error depicting errors when decoding wire rows into readings
#[derive(Error, Debug)]
pub enum ReadingError {
    #[error("ReadingError::Document: {0}")]
    Document(#[from] serde_json::Error),
    #[error("ReadingError::Timestamp: {0}")]
    Timestamp(String),
}

/// Error returned when no tariff covers the requested date
#[derive(Debug, Clone, PartialEq)]
pub enum PriceError {
    MissingRate { category: Category, date: NaiveDate },
}

impl fmt::Display for PriceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PriceError::MissingRate { category, date } =>
                write!(f, "PriceError::MissingRate: no {} rate for {}", category, date),
        }
    }
}

impl std::error::Error for PriceError {}

/// Error depicting errors when saving or loading the selected period
#[derive(Error, Debug)]
pub enum BackupError {
    #[error("BackupError::Io: {0}")]
    Io(#[from] std::io::Error),
    #[error("BackupError::Document: {0}")]
    Document(#[from] serde_json::Error),
}
