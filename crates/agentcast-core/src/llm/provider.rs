//! LlmProvider trait definition.

use agentcast_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for model backends (Bedrock, echo, ...).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Agents are
/// synchronous, so they drive these futures with `Handle::block_on` from
/// the blocking pool.
///
/// Implementations live in agentcast-infra.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "bedrock").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
