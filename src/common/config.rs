//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::{Error, Result};

/// Executable name looked up on PATH when no driver is configured
pub const DRIVER_NAME: &str = "marionette-driver";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Test harness settings
    #[serde(default)]
    pub harness: HarnessConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Test harness configuration
#[derive(Debug, Deserialize, Default)]
pub struct HarnessConfig {
    /// Path to the Marionette driver executable
    pub driver: Option<PathBuf>,

    /// Additional arguments to pass to the driver
    #[serde(default)]
    pub driver_args: Vec<String>,

    /// Default browser binary under test
    pub binary: Option<PathBuf>,
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Maximum wall-clock time for one driver run
    #[serde(default = "default_run")]
    pub run_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            run_secs: default_run(),
        }
    }
}

fn default_run() -> u64 {
    900
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if the file doesn't exist; a file
    /// that exists but fails to parse is a hard error.
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::Config(format!(
                        "Failed to read '{}': {}",
                        path.display(),
                        e
                    )))?;
                return toml::from_str(&content)
                    .map_err(|e| Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }

    /// Resolve the Marionette driver executable
    ///
    /// Resolution order: CLI override, configured path, PATH lookup.
    /// The error lists everything that was tried.
    pub fn find_driver(&self, override_path: Option<&Path>) -> Result<PathBuf> {
        let mut searched = Vec::new();

        if let Some(path) = override_path {
            if path.is_file() {
                return Ok(path.to_path_buf());
            }
            searched.push(format!("--driver {}", path.display()));
        }

        if let Some(path) = &self.harness.driver {
            if path.is_file() {
                return Ok(path.clone());
            }
            searched.push(format!("config harness.driver = {}", path.display()));
        }

        match which::which(DRIVER_NAME) {
            Ok(path) => Ok(path),
            Err(_) => {
                searched.push("PATH".to_string());
                Err(Error::driver_not_found(DRIVER_NAME, &searched))
            }
        }
    }
}
