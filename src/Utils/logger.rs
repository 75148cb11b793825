use std::fs::File;
use std::path::PathBuf;

use chrono::Local;
use log::info;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

use crate::Utils::config::LoggingConfig;
use crate::errors::{MathError, MathResult};

/// Name of a log file stamped with the local date and time.
pub fn log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Initialise the global logger from the logging section of the config.
///
/// Console output goes through a `TermLogger`, file output through a `WriteLogger`.
/// Returns the path of the log file when one was opened. Calling it a second time is
/// harmless: the global logger is already set and the new one is dropped.
pub fn init_logger(settings: &LoggingConfig) -> MathResult<Option<PathBuf>> {
    let level = settings.level_filter()?;

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    // Console logger
    if settings.console {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }

    // File logger
    let mut log_path = None;
    if settings.to_file || settings.file.is_some() {
        let path = PathBuf::from(settings.file.clone().unwrap_or_else(log_file_name));
        let file = File::create(&path)
            .map_err(|e| MathError::Config(format!("creating {}: {}", path.display(), e)))?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
        log_path = Some(path);
    }

    if !loggers.is_empty() && CombinedLogger::init(loggers).is_ok() {
        info!("logging initialised at level {}", level);
    }
    Ok(log_path)
}
