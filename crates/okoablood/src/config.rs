//! Configuration management for okoablood.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geocode::Coordinates;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "okoablood";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "okoablood.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `OKOABLOOD_`, double underscore
///    between section and key: `OKOABLOOD_ELIGIBILITY__COOLDOWN_DAYS`)
/// 2. TOML config file at `~/.config/okoablood/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Donation eligibility configuration.
    pub eligibility: EligibilityConfig,
    /// Backend gateway configuration.
    pub gateway: GatewayConfig,
    /// Map configuration.
    pub map: MapConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/okoablood/okoablood.db`
    pub database_path: Option<PathBuf>,
}

/// Donation eligibility configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    /// Days a donor must wait between donations.
    pub cooldown_days: i64,
}

/// Backend gateway configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Number of attempts for backend fetches.
    pub retry_attempts: u32,
}

/// Map-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map centre latitude for unplaced hospitals.
    pub center_latitude: f64,
    /// Map centre longitude for unplaced hospitals.
    pub center_longitude: f64,
    /// Default location used when searching for nearby donors.
    pub default_location: String,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            cooldown_days: crate::eligibility::DEFAULT_COOLDOWN_DAYS,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            retry_attempts: crate::profile::DEFAULT_RETRY_ATTEMPTS,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_latitude: crate::geocode::NAIROBI_CENTER.latitude,
            center_longitude: crate::geocode::NAIROBI_CENTER.longitude,
            default_location: "Nairobi".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `OKOABLOOD_`, section and key
    ///    separated by a double underscore)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("OKOABLOOD_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.eligibility.cooldown_days <= 0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "cooldown_days must be greater than 0, got {}",
                    self.eligibility.cooldown_days
                ),
            });
        }

        if self.gateway.retry_attempts == 0 {
            return Err(Error::ConfigValidation {
                message: "retry_attempts must be greater than 0".to_string(),
            });
        }

        if !(-90.0..=90.0).contains(&self.map.center_latitude) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "center_latitude must be within -90..=90, got {}",
                    self.map.center_latitude
                ),
            });
        }

        if !(-180.0..=180.0).contains(&self.map.center_longitude) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "center_longitude must be within -180..=180, got {}",
                    self.map.center_longitude
                ),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the configured map centre.
    #[must_use]
    pub fn map_center(&self) -> Coordinates {
        Coordinates {
            latitude: self.map.center_latitude,
            longitude: self.map.center_longitude,
        }
    }
}
