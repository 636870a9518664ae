//! Application settings read from `sonhos.toml`.
//!
//! Every key is optional; anything left out keeps its default.
//!
//! ```toml
//! week_start = "Segunda"
//! default_workdays = ["Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado"]
//! rows_per_page = 25
//!
//! [logging]
//! level = "debug"
//! file = "sonhos.log"
//! stdout = true
//! ```

use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::Deserialize;
use sonhos_core::WeekdaySet;
use sonhos_core::models::weekday::parse_weekday;
use sonhos_core::table::RowsPerPage;
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sonhos.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    /// Append log records to this file as well.
    pub file: Option<PathBuf>,
    /// Write log records to stderr.
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            stdout: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// First column of the calendar grid.
    #[serde(deserialize_with = "deserialize_weekday")]
    pub week_start: Weekday,
    /// Workdays preselected on a new goal.
    pub default_workdays: WeekdaySet,
    pub rows_per_page: RowsPerPage,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            default_workdays: WeekdaySet::workdays(),
            rows_per_page: RowsPerPage::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn deserialize_weekday<'de, D>(deserializer: D) -> Result<Weekday, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    parse_weekday(&name).map_err(serde::de::Error::custom)
}

impl AppConfig {
    pub fn from_toml_str(
        input: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`, which must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Reads an explicit path, or [`DEFAULT_CONFIG_FILE`] if it exists, or
    /// falls back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    debug!("no {DEFAULT_CONFIG_FILE} found; using defaults");
                    Ok(Self::default())
                }
            }
        }
    }
}
