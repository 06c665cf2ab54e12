//! LLM provider abstraction.
//!
//! `LlmProvider` is the port model backends implement; `BoxLlmProvider`
//! erases the concrete type so one provider can be shared by every agent.

pub mod box_provider;
pub mod provider;
