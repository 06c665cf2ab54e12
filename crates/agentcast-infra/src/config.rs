//! Server configuration loader for agentcast.
//!
//! Reads `config.toml` (from the data directory, or an explicit path) and
//! deserializes it into [`ServerConfig`]. Falls back to defaults when the
//! file is missing or malformed, then applies environment overrides.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use agentcast_types::config::ServerConfig;

/// File name looked up inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable holding the Bedrock bearer token.
pub const BEDROCK_TOKEN_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";

/// Default config path: `{data_dir}/config.toml`.
pub fn default_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_server_config(path: &Path) -> ServerConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ServerConfig::default()
        }
    }
}

/// Apply `AWS_BEDROCK_MODEL` and `AWS_REGION` on top of the file config.
///
/// `lookup` is `std::env::var(..).ok()` in production; tests pass a map.
pub fn apply_env_overrides(config: &mut ServerConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(model) = lookup("AWS_BEDROCK_MODEL").filter(|s| !s.is_empty()) {
        config.model.model_id = model;
    }
    if let Some(region) = lookup("AWS_REGION").filter(|s| !s.is_empty()) {
        config.model.region = region;
    }
}

/// Load the file config and apply process environment overrides.
pub async fn load_with_env(path: &Path) -> ServerConfig {
    let mut config = load_server_config(path).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

/// The Bedrock bearer token from the environment, if set.
pub fn bedrock_token_from_env() -> Option<SecretString> {
    std::env::var(BEDROCK_TOKEN_ENV)
        .ok()
        .filter(|s| !s.is_empty())
        .map(SecretString::from)
}
