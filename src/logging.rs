use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use crate::config::General;
use crate::errors::LoggingError;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// Builds the log4rs configuration, a file appender and optionally stdout
///
/// # Arguments
///
/// * 'general' - the general configuration section
pub fn build_log_config(general: &General) -> Result<Config, LoggingError> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&general.log_path)?;

    let mut builder = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    builder.build(root.build(general.log_level))
        .map_err(|e| LoggingError(e.to_string()))
}

/// Sets up logging, must be called once before anything is logged
///
/// # Arguments
///
/// * 'general' - the general configuration section
pub fn setup_logger(general: &General) -> Result<Handle, LoggingError> {
    let config = build_log_config(general)?;
    Ok(log4rs::init_config(config)?)
}
