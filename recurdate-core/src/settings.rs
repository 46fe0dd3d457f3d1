//! User settings.
//!
//! Layered from built-in defaults, then `~/.config/recurdate/config.toml`,
//! then `RECURDATE_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_HORIZON_YEARS, DEFAULT_LOG_LEVEL, DEFAULT_MAX_OCCURRENCES, ENV_PREFIX,
};
use crate::error::{RecurError, RecurResult};
use crate::expand::ExpandOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Hard cap on previewed occurrences
    pub max_occurrences: usize,

    /// Iteration ceiling, in years past the anchor date
    pub horizon_years: u32,

    /// tracing filter directive, e.g. "warn" or "recurdate_core=debug"
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
            horizon_years: DEFAULT_HORIZON_YEARS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// ~/.config/recurdate/config.toml
    pub fn config_path() -> RecurResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RecurError::Config("Could not determine config directory".into()))?
            .join("recurdate");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings from the default config file (if present) and the environment.
    pub fn load() -> RecurResult<Self> {
        let path = Self::config_path()?;
        Self::load_from(Some(&path))
    }

    /// Load settings from `path` (if given and present) and the environment.
    pub fn load_from(path: Option<&Path>) -> RecurResult<Self> {
        let mut builder = Config::builder()
            .set_default("max_occurrences", DEFAULT_MAX_OCCURRENCES as u64)
            .and_then(|b| b.set_default("horizon_years", u64::from(DEFAULT_HORIZON_YEARS)))
            .and_then(|b| b.set_default("log_level", DEFAULT_LOG_LEVEL))
            .map_err(|e| RecurError::Config(e.to_string()))?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| RecurError::Config(e.to_string()))?;

        tracing::debug!(?settings, "Settings loaded");

        Ok(settings)
    }

    pub fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            max_occurrences: self.max_occurrences,
            horizon_years: self.horizon_years,
        }
    }
}
