//! Shared resources handed to every agent at construction.
//!
//! The model provider and conversation memory are expensive or stateful and
//! must be shared by all agents. They are built once at start-up and passed
//! explicitly; no agent looks anything up globally.

use std::sync::Arc;

use tokio::runtime::Handle;

use agentcast_types::config::ModelConfig;
use agentcast_types::llm::{CompletionRequest, CompletionResponse, LlmError, Message};

use crate::llm::box_provider::BoxLlmProvider;
use crate::memory::ConversationMemory;

/// Model parameters applied to every request.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl From<&ModelConfig> for ModelSettings {
    fn from(config: &ModelConfig) -> Self {
        Self {
            model_id: config.model_id.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

pub struct AgentResources {
    pub provider: Arc<BoxLlmProvider>,
    pub memory: Arc<ConversationMemory>,
    pub settings: ModelSettings,
    /// Runtime used to drive provider futures from blocking agent calls.
    runtime: Handle,
}

impl AgentResources {
    pub fn new(
        provider: BoxLlmProvider,
        memory: ConversationMemory,
        settings: ModelSettings,
        runtime: Handle,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            memory: Arc::new(memory),
            settings,
            runtime,
        }
    }

    /// Build a request with the shared model settings.
    pub fn request(&self, system: String, messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model_id.clone(),
            messages,
            system: Some(system),
            max_tokens: self.settings.max_tokens,
            temperature: Some(self.settings.temperature),
        }
    }

    /// Run a completion to the end, blocking the current thread.
    ///
    /// Must be called from a thread outside the async runtime's workers
    /// (the blocking pool), otherwise `block_on` panics.
    pub fn complete_blocking(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.runtime.block_on(self.provider.complete(request))
    }
}
