//! Host configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML file,
//! `WASTEWATCH_*` environment variables, then command line flags.

use anyhow::{Context, Result};
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the config file looked up inside the data directory.
pub const CONFIG_FILE_NAME: &str = "wastewatch.toml";
/// Environment variable that relocates the data directory.
pub const DATA_DIR_ENV: &str = "WASTEWATCH_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "./data/wastewatch";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: String,
    pub log_level: String,
    pub log_format: String,
}

/// Command line values that take precedence over every other source.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub data_dir: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl AppConfig {
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let default_data_dir = search_data_dir(overrides, std::env::var(DATA_DIR_ENV).ok());

        let resolved_path = match config_path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!(
                        "Configuration file {} not found (specified via --config)",
                        path.display()
                    );
                }
                Some(path.to_path_buf())
            }
            None => {
                let path = PathBuf::from(&default_data_dir).join(CONFIG_FILE_NAME);
                path.exists().then_some(path)
            }
        };

        let mut builder = Config::builder()
            .set_default("data_dir", default_data_dir)?
            .set_default("log_level", "info")?
            .set_default("log_format", "pretty")?;

        if let Some(path) = &resolved_path {
            builder = builder.add_source(ConfigFile::from(path.as_path()));
        }
        builder = builder.add_source(Environment::with_prefix("WASTEWATCH"));

        let mut config: AppConfig = builder
            .build()?
            .try_deserialize()
            .context("invalid configuration")?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(data_dir) = &overrides.data_dir {
            self.data_dir = data_dir.clone();
        }
        if let Some(log_level) = &overrides.log_level {
            self.log_level = log_level.clone();
        }
        if let Some(log_format) = &overrides.log_format {
            self.log_format = log_format.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            anyhow::bail!("DATA_DIR must not be empty");
        }
        if !matches!(self.log_format.as_str(), "pretty" | "json") {
            anyhow::bail!(
                "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                self.log_format
            );
        }
        Ok(())
    }

    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("db")
    }
}

/// Data directory searched for [`CONFIG_FILE_NAME`]: the flag, then the
/// environment, then the built-in default.
fn search_data_dir(overrides: &Overrides, env_data_dir: Option<String>) -> String {
    overrides
        .data_dir
        .clone()
        .or(env_data_dir.filter(|dir| !dir.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
}
