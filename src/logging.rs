use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::{AppError, AppResult};

/// Installs the global subscriber when a log file is configured.
///
/// The terminal belongs to the UI, so nothing is ever written to stdout or
/// stderr. Returns `false` when logging stays disabled.
pub fn init_logging(config: &LogConfig) -> AppResult<bool> {
    let Some(path) = config.file.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| {
            AppError::io_with_context(source, format!("failed to open log file: {}", path.display()))
        })?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|err| AppError::invalid_argument(format!("invalid log level: {err}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| AppError::invalid_argument(format!("logging already initialized: {err}")))?;
    Ok(true)
}
