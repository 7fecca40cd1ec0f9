//! Log sink setup.
//!
//! Library code logs through the `log` facade. The terminal UI owns stdout,
//! so records go to a file through `tracing-subscriber`, whose `tracing-log`
//! bridge picks up `log` macros. `RUST_LOG` overrides the configured level.

use crate::error::AppError;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub fn init_logging(log_file: &Path, level: &str) -> Result<(), AppError> {
    if let Some(dir) = log_file.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| AppError::Io(e.to_string()))
}
