//! Single-persona agent backed by the shared model provider.

use std::sync::Arc;

use tracing::{debug, info_span};

use agentcast_types::agent::AgentResponse;
use agentcast_types::error::AgentError;
use agentcast_types::llm::Message;

use super::Agent;
use super::persona::Persona;
use super::resources::AgentResources;

/// Answers queries with one model call, replaying recent history for the
/// caller's identity as context.
pub struct LlmAgent {
    persona: Persona,
    system_prompt: String,
    resources: Arc<AgentResources>,
}

impl LlmAgent {
    pub fn new(persona: Persona, resources: Arc<AgentResources>) -> Self {
        let system_prompt = persona.system_prompt();
        Self {
            persona,
            system_prompt,
            resources,
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }
}

impl Agent for LlmAgent {
    fn name(&self) -> &str {
        self.persona.name
    }

    fn run(&self, query: &str, identity: &str) -> Result<AgentResponse, AgentError> {
        let mut messages = self.resources.memory.history(self.persona.name, identity);
        let history_len = messages.len();
        messages.push(Message::user(query));

        let request = self
            .resources
            .request(self.system_prompt.clone(), messages);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.resources.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            agent = self.persona.name,
        );
        let _guard = span.enter();

        let response = self
            .resources
            .complete_blocking(&request)
            .map_err(|e| AgentError::Model(e.to_string()))?;

        debug!(
            history_messages = history_len,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = %response.stop_reason,
            "model call complete"
        );

        if response.content.is_empty() {
            return Ok(AgentResponse::empty());
        }

        self.resources
            .memory
            .record(self.persona.name, identity, query, &response.content);
        Ok(AgentResponse::text(response.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::resources::testing::{ScriptedProvider, resources};
    use agentcast_types::llm::MessageRole;

    fn run_blocking(
        agent: Arc<LlmAgent>,
        query: &'static str,
        identity: &'static str,
    ) -> tokio::task::JoinHandle<Result<AgentResponse, AgentError>> {
        tokio::task::spawn_blocking(move || agent.run(query, identity))
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_returns_model_text() {
        let provider = ScriptedProvider::new(|_| Ok("Paris is the capital.".to_string()));
        let seen = provider.seen.clone();
        let agent = Arc::new(LlmAgent::new(Persona::general(), resources(provider)));

        let response = run_blocking(agent, "capital of France?", "u1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(response.content.as_deref(), Some("Paris is the capital."));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "test-model");
        assert!(seen[0].system.as_deref().unwrap().contains("helpful"));
        assert_eq!(seen[0].messages.len(), 1);
        assert_eq!(seen[0].messages[0].content, "capital of France?");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_history_replayed_for_same_identity() {
        let provider = ScriptedProvider::new(|req| {
            Ok(format!("answer {}", req.messages.len()))
        });
        let seen = provider.seen.clone();
        let agent = Arc::new(LlmAgent::new(Persona::research(), resources(provider)));

        run_blocking(agent.clone(), "first", "u1").await.unwrap().unwrap();
        run_blocking(agent.clone(), "second", "u1").await.unwrap().unwrap();
        run_blocking(agent, "other", "u2").await.unwrap().unwrap();

        let seen = seen.lock().unwrap();
        let second = &seen[1].messages;
        assert_eq!(second.len(), 3);
        assert_eq!(second[0].content, "first");
        assert_eq!(second[1].role, MessageRole::Assistant);
        assert_eq!(second[1].content, "answer 1");
        assert_eq!(second[2].content, "second");

        // a different identity starts fresh
        assert_eq!(seen[2].messages.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_provider_failure_maps_to_model_error() {
        let provider = ScriptedProvider::new(|_| Err("HTTP 500".to_string()));
        let agent = Arc::new(LlmAgent::new(Persona::analyze(), resources(provider)));

        let err = run_blocking(agent, "2+2", "u1").await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "provider error: HTTP 500");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_empty_completion_is_no_content() {
        let provider = ScriptedProvider::new(|_| Ok(String::new()));
        let agent = Arc::new(LlmAgent::new(Persona::general(), resources(provider)));

        let response = run_blocking(agent, "hi", "u1").await.unwrap().unwrap();
        assert!(response.content.is_none());
    }
}
