//! Shared domain types for agentcast.
//!
//! This crate contains the types shared across the workspace: agent
//! identifiers, the streaming session wire format, artifacts, LLM request
//! shapes, configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod agent;
pub mod artifact;
pub mod config;
pub mod error;
pub mod llm;
pub mod session;
