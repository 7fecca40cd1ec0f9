pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod logging;
pub mod tui;
pub mod ui;

use config::AppConfig;
use infra::{DbLocation, DbPool};
use std::process::ExitCode;
use ui::{FormController, UI};

/// Closes the connection when the application scope ends, however it ends.
pub struct ShutdownGuard<'a>(pub &'a DbPool);

impl Drop for ShutdownGuard<'_> {
    fn drop(&mut self) {
        log::info!("Shutting down");
        self.0.close();
    }
}

/// Message shown when the startup connection check fails.
pub fn startup_diagnostic(location: &DbLocation) -> String {
    format!(
        "Could not open the subventions database.\n\n\
         Location: {}\n\n\
         Check that:\n\
         1. The file and its directory exist or can be created\n\
         2. The current user can read and write them\n\
         3. The file is a SQLite database and not locked by another program\n\
         4. The schema migrations can be applied (see the log file)\n\n\
         Set SUBVENTION_DB_PATH to use a different database file.",
        location
    )
}

pub fn run() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_logging(&config.log_file, &config.log_level) {
        eprintln!("Logging disabled: {}", e);
    }
    log::info!(
        "Starting subvention-desk {} (database: {})",
        env!("CARGO_PKG_VERSION"),
        config.db.location
    );

    let pool = DbPool::new(config.db.clone());
    if !pool.test_connection() {
        eprintln!("{}", startup_diagnostic(pool.location()));
        return ExitCode::FAILURE;
    }
    let _shutdown = ShutdownGuard(&pool);

    let mut ctl = FormController::new(&pool);
    let ui = UI::new(config.format.clone());
    match tui::run_tui(&mut ctl, &ui) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal UI failed: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
