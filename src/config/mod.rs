mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration named by `CONFIG_PATH`, or `config.yaml`.
///
/// Without `CONFIG_PATH` a missing `config.yaml` is not an error: every
/// setting has a default. A path given explicitly must exist.
pub async fn load() -> Result<Config> {
    match env::var("CONFIG_PATH") {
        Ok(config_path) => load_from(&config_path).await,
        Err(_) if !Path::new(DEFAULT_CONFIG_PATH).exists() => {
            debug!(
                "No {} found, using default configuration",
                DEFAULT_CONFIG_PATH
            );
            Ok(Config::default())
        }
        Err(_) => load_from(DEFAULT_CONFIG_PATH).await,
    }
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(config_str)?;
    Ok(config)
}

impl Config {
    /// Applies `PORT` to the translation service.
    pub fn apply_api_overrides(&mut self, port: Option<String>) -> Result<()> {
        if let Some(port) = port {
            self.server.port = parse_port(&port)?;
        }
        Ok(())
    }

    /// Applies `PORT` and `API_URL` to the web UI.
    pub fn apply_ui_overrides(&mut self, port: Option<String>, api_url: Option<String>) -> Result<()> {
        if let Some(port) = port {
            self.ui.port = parse_port(&port)?;
        }
        if let Some(api_url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.ui.api_url = api_url;
        }
        Ok(())
    }
}

fn parse_port(value: &str) -> Result<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("Invalid port: '{}'", value)))
}
