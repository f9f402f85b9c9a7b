//! Seed configuration loading from config.toml
//!
//! Farms and their warehouses listed in config.toml are created on startup
//! if they do not already exist, so a fresh deployment comes up usable.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of farms to seed
    #[serde(default)]
    pub farms: Vec<FarmConfig>,
}

/// Configuration for a single farm
#[derive(Debug, Deserialize, Clone)]
pub struct FarmConfig {
    /// Name of the farm
    pub name: String,
    /// User id of the farm owner
    pub owner: String,
    /// Warehouse names to create in this farm
    #[serde(default)]
    pub warehouses: Vec<String>,
}

/// Loads seed configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}
