//! Application state wiring all services together.
//!
//! AppState holds the concrete instances used by both CLI commands and the
//! HTTP/WebSocket server. The streaming session is generic over its artifact
//! store; AppState pins it to the local directory implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use agentcast_core::agent::registry::AgentRegistry;
use agentcast_core::agent::resources::{AgentResources, ModelSettings};
use agentcast_core::dispatch::AgentDispatcher;
use agentcast_core::llm::box_provider::BoxLlmProvider;
use agentcast_core::memory::ConversationMemory;
use agentcast_core::session::{SessionConfig, StreamingSession};
use agentcast_infra::config::{bedrock_token_from_env, default_config_path, load_with_env};
use agentcast_infra::filesystem::resolve_data_dir;
use agentcast_infra::llm::build_provider;
use agentcast_infra::storage::LocalArtifactStore;
use agentcast_types::config::ServerConfig;

/// Session state machine pinned to the infra artifact store.
pub type ConcreteSession = StreamingSession<LocalArtifactStore>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub data_dir: PathBuf,
    pub provider_name: String,
    pub registry: Arc<AgentRegistry>,
    pub dispatcher: AgentDispatcher,
    pub artifacts: Arc<LocalArtifactStore>,
    pub session: ConcreteSession,
}

impl AppState {
    /// Resolve the data directory, load configuration, build the model
    /// provider and open the artifact directory.
    pub async fn init(config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config_path = config_path.unwrap_or_else(|| default_config_path(&data_dir));
        let config = load_with_env(&config_path).await;
        tracing::debug!(
            config = %config_path.display(),
            provider = %config.model.provider,
            model = %config.model.model_id,
            "configuration loaded"
        );

        let provider = build_provider(&config.model, bedrock_token_from_env())?;
        let artifacts = LocalArtifactStore::open(&config.artifacts_dir).await?;

        Ok(Self::from_parts(config, data_dir, provider, artifacts))
    }

    /// Wire the agents, dispatcher and session from already-built parts.
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_parts(
        config: ServerConfig,
        data_dir: PathBuf,
        provider: BoxLlmProvider,
        artifacts: LocalArtifactStore,
    ) -> Self {
        let provider_name = provider.name().to_string();
        let resources = Arc::new(AgentResources::new(
            provider,
            ConversationMemory::new(config.model.history_runs),
            ModelSettings::from(&config.model),
            tokio::runtime::Handle::current(),
        ));

        let registry = Arc::new(AgentRegistry::with_default_agents(resources));
        let dispatcher =
            AgentDispatcher::from_secs(config.max_concurrent_runs, config.agent_timeout_secs);
        let artifacts = Arc::new(artifacts);
        let session = StreamingSession::new(
            registry.clone(),
            dispatcher.clone(),
            artifacts.clone(),
            SessionConfig {
                chunk_delay: Duration::from_millis(config.chunk_delay_ms),
            },
        );

        Self {
            config: Arc::new(config),
            data_dir,
            provider_name,
            registry,
            dispatcher,
            artifacts,
            session,
        }
    }
}
