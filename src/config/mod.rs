mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Loads the configuration once at startup.
///
/// An optional YAML file named by `CONFIG_PATH` provides the base values,
/// environment variables override them.
pub async fn load() -> Result<Config> {
    load_with(|key| env::var(key).ok()).await
}

/// Same as [`load`], reading every variable, `CONFIG_PATH` included, from `lookup`.
pub async fn load_with<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let yaml = match lookup("CONFIG_PATH") {
        Some(path) if !path.trim().is_empty() => {
            debug!("Loading configuration from: {}", path);
            Some(tokio::fs::read_to_string(&path).await?)
        }
        _ => None,
    };

    load_from(yaml.as_deref(), lookup)
}

/// Builds a validated configuration from YAML text and an environment lookup.
pub fn load_from<F>(yaml: Option<&str>, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: Config = match yaml {
        Some(text) if !text.trim().is_empty() => serde_yaml::from_str(text)?,
        _ => Config::default(),
    };

    // Empty values count as unset
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = var("HOST") {
        config.server.host = host;
    }
    if let Some(port) = var("PORT") {
        config.server.port = parse_var("PORT", &port)?;
    }
    if let Some(origins) = var("ALLOWED_ORIGINS") {
        config.server.allowed_origins = origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
    }
    if let Some(level) = var("LOG_LEVEL") {
        config.server.logs.level = level;
    }
    if let Some(endpoint) = var("SAGEMAKER_ENDPOINT_NAME") {
        config.inference.endpoint_name = endpoint;
    }
    if let Some(region) = var("AWS_REGION") {
        config.inference.region = region;
    }
    if let Some(url) = var("SAGEMAKER_RUNTIME_URL") {
        config.inference.runtime_url = Some(url);
    }
    if let Some(timeout) = var("INFERENCE_TIMEOUT_SECS") {
        config.inference.timeout_secs = parse_var("INFERENCE_TIMEOUT_SECS", &timeout)?;
    }
    if let Some(size) = var("MAX_FILE_SIZE") {
        config.upload.max_file_size = parse_var("MAX_FILE_SIZE", &size)?;
    }

    validate(&config)?;
    Ok(config)
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("Invalid value for {}: '{}'", key, value)))
}

fn validate(config: &Config) -> Result<()> {
    if config.inference.endpoint_name.trim().is_empty() {
        return Err(Error::config(
            "SAGEMAKER_ENDPOINT_NAME environment variable is required",
        ));
    }
    if config.upload.max_file_size == 0 {
        return Err(Error::config("MAX_FILE_SIZE must be greater than zero"));
    }
    if config.inference.timeout_secs == 0 {
        return Err(Error::config(
            "INFERENCE_TIMEOUT_SECS must be greater than zero",
        ));
    }
    if config.server.allowed_origins.is_empty() {
        return Err(Error::config("ALLOWED_ORIGINS must list at least one origin"));
    }
    Ok(())
}
