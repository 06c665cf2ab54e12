//! Offline provider that answers with the caller's last message.
//!
//! Used for local development and smoke tests without cloud credentials.

use agentcast_core::llm::provider::LlmProvider;
use agentcast_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, StopReason, Usage,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct EchoProvider;

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let content = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.clone())
            .ok_or_else(|| LlmError::InvalidRequest("no user message to echo".to_string()))?;

        let words = content.split_whitespace().count() as u32;
        Ok(CompletionResponse {
            content,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage {
                input_tokens: words,
                output_tokens: words,
            },
        })
    }
}
