//! Agent registry, dispatch and streaming session logic for agentcast.
//!
//! This crate defines the "ports" (the `LlmProvider` and `ArtifactStore`
//! traits) that the infrastructure layer implements, plus the transport-free
//! session state machine that the WebSocket handler drives. It depends only
//! on `agentcast-types` -- never on `agentcast-infra` or any HTTP/IO crate.

pub mod agent;
pub mod dispatch;
pub mod llm;
pub mod memory;
pub mod session;
pub mod storage;
