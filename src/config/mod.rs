mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::{debug, warn};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration file (if any) and applies environment overrides.
///
/// `CONFIG_PATH` must point at an existing file when set. Without it,
/// `config.yaml` in the working directory is used when present and built-in
/// defaults otherwise.
pub async fn load() -> Result<Config> {
    let mut config = match env::var("CONFIG_PATH") {
        Ok(path) => load_from(&path).await?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from(DEFAULT_CONFIG_PATH).await?,
        Err(_) => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok())?;

    if config.llm.api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; estimation requests will be rejected upstream");
    }

    Ok(config)
}

pub fn from_yaml_str(yaml: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Environment wins over the file: `GEMINI_API_KEY` and `PORT`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(api_key) = lookup("GEMINI_API_KEY").filter(|key| !key.is_empty()) {
        config.llm.api_key = api_key;
    }

    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("PORT must be a valid port number, got '{}'", port)))?;
    }

    Ok(())
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    from_yaml_str(&config_str)
}
