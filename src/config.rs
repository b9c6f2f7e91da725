//! Runtime configuration, read from `config.toml` in the platform config
//! directory and overridden by command-line flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};
use crate::translate::Locale;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Highest id the explorer pages through.
pub const DEFAULT_CATALOG_MAX: u32 = 1010;
pub const DEFAULT_NOTICE_SECS: u64 = 5;

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub page_size: u32,
    pub catalog_max: u32,
    pub language: Locale,
    pub notice_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            catalog_max: DEFAULT_CATALOG_MAX,
            language: Locale::default(),
            notice_secs: DEFAULT_NOTICE_SECS,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub language: Option<Locale>,
}

impl Config {
    /// Default location: `<config_dir>/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "dex-explorer", "dex-explorer")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Load from `path`. A missing file yields defaults; an unreadable or
    /// malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {:?}", path);
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or the default location when `None`.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load_from(p)?,
            None => match Self::default_path() {
                Some(p) => Self::load_from(&p)?,
                None => Self::default(),
            },
        };
        if let Some(base) = overrides.api_base {
            config.api_base = base;
        }
        if let Some(language) = overrides.language {
            config.language = language;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::ConfigInvalid("page_size must be at least 1".into()));
        }
        if self.catalog_max == 0 {
            return Err(Error::ConfigInvalid("catalog_max must be at least 1".into()));
        }
        if self.api_base.trim().is_empty() {
            return Err(Error::ConfigInvalid("api_base must not be empty".into()));
        }
        Ok(())
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_secs)
    }
}
