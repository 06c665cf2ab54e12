//! Server configuration types for agentcast.
//!
//! `ServerConfig` represents the top-level `config.toml`. Every field has a
//! default so an empty or missing file yields a working server.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Flat directory holding uploaded and generated artifacts.
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: String,

    /// Delay between consecutive `chunk` events.
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,

    /// Deadline for a single agent invocation; `0` disables it.
    #[serde(default = "default_agent_timeout_secs")]
    pub agent_timeout_secs: u64,

    /// Upper bound on agent invocations running at once.
    #[serde(default = "default_max_concurrent_runs")]
    pub max_concurrent_runs: usize,

    #[serde(default)]
    pub model: ModelConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_artifacts_dir() -> String {
    "tmp".to_string()
}

fn default_chunk_delay_ms() -> u64 {
    30
}

fn default_agent_timeout_secs() -> u64 {
    300
}

fn default_max_concurrent_runs() -> usize {
    8
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            artifacts_dir: default_artifacts_dir(),
            chunk_delay_ms: default_chunk_delay_ms(),
            agent_timeout_secs: default_agent_timeout_secs(),
            max_concurrent_runs: default_max_concurrent_runs(),
            model: ModelConfig::default(),
        }
    }
}

/// Which backend answers model calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// AWS Bedrock Runtime (Converse API).
    Bedrock,
    /// Offline provider that answers with the user's own message.
    Echo,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Bedrock => write!(f, "bedrock"),
            ProviderKind::Echo => write!(f, "echo"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bedrock" => Ok(ProviderKind::Bedrock),
            "echo" => Ok(ProviderKind::Echo),
            other => Err(format!("invalid provider: '{other}'")),
        }
    }
}

/// Model settings shared by every agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,

    #[serde(default = "default_model_id")]
    pub model_id: String,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Number of past exchanges per session replayed into the model context.
    #[serde(default = "default_history_runs")]
    pub history_runs: usize,
}

fn default_provider() -> ProviderKind {
    ProviderKind::Bedrock
}

fn default_model_id() -> String {
    "openai.gpt-oss-120b-1:0".to_string()
}

fn default_region() -> String {
    "us-west-2".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f64 {
    0.7
}

fn default_history_runs() -> usize {
    5
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model_id: default_model_id(),
            region: default_region(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            history_runs: default_history_runs(),
        }
    }
}
