//! Chaincode configuration (defaults + TOML file + environment).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChaincodeConfig {
    /// Name used in log output and startup messages.
    #[serde(default = "default_name")]
    pub name: String,
    /// Address the local invocation service listens on.
    #[serde(default = "default_address")]
    pub address: String,
    /// `tracing-subscriber` filter directive, e.g. `info` or `chaincode_dispatch=debug`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// `text` or `json`.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ChaincodeConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            address: default_address(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_name() -> String {
    "very-simple".into()
}
fn default_address() -> String {
    "127.0.0.1:9999".into()
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(String),
}

/// Merges, in increasing priority: defaults, the TOML file at `config_path`
/// (if given and present), and `CHAINCODE_`-prefixed environment variables.
pub fn load_config(config_path: Option<&str>) -> Result<ChaincodeConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(ChaincodeConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("CHAINCODE_"));

    figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))
}
