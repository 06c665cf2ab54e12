//! AWS Bedrock LLM provider implementation.
//!
//! Implements [`LlmProvider`](agentcast_core::llm::provider::LlmProvider)
//! over the Bedrock Runtime Converse API with Bearer token authentication.

mod client;
pub mod types;

pub use client::BedrockProvider;
