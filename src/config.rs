//! Configuration management for the lending catalog

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::import::ImportLimits;

#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Catalog file read at startup
    pub path: Option<PathBuf>,
    pub max_section_records: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .set_default("import.max_section_records", i32::MAX as i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables (with prefix LENDING_), e.g. LENDING_LOGGING__LEVEL
            .add_source(
                Environment::with_prefix("LENDING")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("import.path", env::var("LENDING_IMPORT_PATH").ok())?
            .build()?;

        config.try_deserialize()
    }

    pub fn import_limits(&self) -> ImportLimits {
        ImportLimits {
            max_section_records: self.import.max_section_records,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_section_records: ImportLimits::default().max_section_records,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
