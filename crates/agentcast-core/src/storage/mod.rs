//! Storage abstractions for agentcast.
//!
//! Defines the artifact store trait. Implementations live in agentcast-infra.

pub mod artifact_store;
