use core::fmt::{Debug, Display};
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "ballot.toml";
pub const ENV_PREFIX: &str = "BALLOT_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where the participants, selections and to-dos are kept.
    pub data_dir: PathBuf,
    /// Team list, as written by the team scraper.
    pub teams: PathBuf,
    pub cocktails: PathBuf,
    /// Default `tracing` filter, `RUST_LOG` wins over it.
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".ballot"),
            teams: PathBuf::from("teams.json"),
            cocktails: PathBuf::from("cocktails.json"),
            log: "info".to_owned(),
        }
    }
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[must_use]
pub fn layered(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Defaults, overridden by `ballot.toml` in the working directory,
/// overridden by `BALLOT_*` environment variables.
pub fn get_config() -> Result<Config, ConfigError> {
    get_config_from(Path::new(CONFIG_FILE))
}

pub fn get_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(layered(path).extract()?)
}
