//! Application configuration.
//!
//! Built from three layers, later ones winning: built-in defaults, an
//! optional TOML file, then environment variables (a `.env` file in the
//! working directory is loaded first).
//!
//! ```toml
//! [database]
//! path = "/var/lib/subvention-desk/subvenciones.db"
//!
//! [display]
//! locale = "es-ES"
//! currency = "EUR"
//!
//! [logging]
//! file = "/tmp/subvention-desk.log"
//! level = "debug"
//! ```

use crate::error::AppError;
use crate::infra::DbConfig;
use crate::ui::format::{CurrencyFormat, Locale};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "subvention-desk";

pub const ENV_CONFIG_FILE: &str = "SUBVENTION_DESK_CONFIG";
pub const ENV_DB_PATH: &str = "SUBVENTION_DB_PATH";
pub const ENV_LOCALE: &str = "SUBVENTION_LOCALE";
pub const ENV_CURRENCY: &str = "SUBVENTION_CURRENCY";
pub const ENV_LOG_FILE: &str = "SUBVENTION_LOG_FILE";

const MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub database: DatabaseSection,
    pub display: DisplaySection,
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySection {
    pub locale: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub file: Option<PathBuf>,
    pub level: Option<String>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self, AppError> {
        toml::from_str(text).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn read(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Self::parse(&text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db: DbConfig,
    pub format: CurrencyFormat,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Load from the process environment and the default file locations.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let file = match std::env::var(ENV_CONFIG_FILE) {
            Ok(explicit) => FileConfig::read(Path::new(&explicit))?,
            Err(_) => match default_config_file() {
                Some(path) if path.exists() => FileConfig::read(&path)?,
                _ => FileConfig::default(),
            },
        };

        Self::resolve(file, |key| std::env::var(key).ok(), &default_data_dir())
    }

    /// Merge a parsed file and an environment lookup over the defaults rooted
    /// at `data_dir`.
    pub fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
        data_dir: &Path,
    ) -> Result<Self, AppError> {
        let db_path = env(ENV_DB_PATH)
            .map(PathBuf::from)
            .or(file.database.path)
            .unwrap_or_else(|| data_dir.join("subvenciones.db"));
        let db = if db_path.as_os_str() == MEMORY_PATH {
            DbConfig::in_memory()
        } else {
            DbConfig::file(db_path)
        };

        let locale_tag = env(ENV_LOCALE)
            .or(file.display.locale)
            .unwrap_or_else(|| Locale::EsEs.tag().to_string());
        let locale = Locale::from_tag(&locale_tag)
            .ok_or_else(|| AppError::Config(format!("unsupported locale '{}'", locale_tag)))?;

        let currency = env(ENV_CURRENCY)
            .or(file.display.currency)
            .unwrap_or_else(|| "EUR".to_string());
        let currency = currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::Config(format!(
                "currency must be a 3-letter code, got '{}'",
                currency
            )));
        }

        let log_file = env(ENV_LOG_FILE)
            .map(PathBuf::from)
            .or(file.logging.file)
            .unwrap_or_else(|| data_dir.join("logs").join("app.log"));
        let log_level = file.logging.level.unwrap_or_else(|| "info".to_string());

        Ok(Self {
            db,
            format: CurrencyFormat::new(locale, currency),
            log_file,
            log_level,
        })
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}
