//! Agents: the synchronous collaborators that answer queries.
//!
//! Every agent exposes one blocking operation, [`Agent::run`]. Callers on
//! the async runtime must never invoke it directly; they go through
//! [`crate::dispatch::AgentDispatcher`], which moves the call onto the
//! blocking pool.

pub mod llm_agent;
pub mod persona;
pub mod registry;
pub mod resources;
pub mod team;

use std::sync::Arc;

use agentcast_types::agent::AgentResponse;
use agentcast_types::error::AgentError;

/// A configured persona that answers one query at a time.
pub trait Agent: Send + Sync {
    /// Display name (e.g., "ResearchAgent").
    fn name(&self) -> &str;

    /// Answer `query` on behalf of `identity`.
    ///
    /// Blocks the calling thread until the answer is ready. `identity`
    /// scopes the agent's conversation memory.
    fn run(&self, query: &str, identity: &str) -> Result<AgentResponse, AgentError>;
}

/// Shared handle to a registered agent.
pub type AgentHandle = Arc<dyn Agent>;
