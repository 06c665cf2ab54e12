//! Agent registry: the closed mapping from [`AgentKind`] to agent handles.
//!
//! Unknown identifiers are rejected here, at the boundary, before any work
//! is scheduled. Resolution never mutates the registry, so resolving the
//! same identifier twice yields the same shared handle.

use std::collections::BTreeMap;
use std::sync::Arc;

use agentcast_types::agent::AgentKind;
use agentcast_types::error::RegistryError;

use super::llm_agent::LlmAgent;
use super::persona::Persona;
use super::resources::AgentResources;
use super::team::TeamAgent;
use super::AgentHandle;

/// Immutable set of agents built once at start-up.
#[derive(Clone, Default)]
pub struct AgentRegistry {
    agents: BTreeMap<AgentKind, AgentHandle>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the agent answering for `kind`.
    pub fn with_agent(mut self, kind: AgentKind, agent: AgentHandle) -> Self {
        self.agents.insert(kind, agent);
        self
    }

    /// Build the standard research/analyze/general agents plus the team
    /// that coordinates them, all sharing `resources`.
    pub fn with_default_agents(resources: Arc<AgentResources>) -> Self {
        let mut registry = Self::new();
        let mut members = Vec::with_capacity(AgentKind::MEMBERS.len());

        for kind in AgentKind::MEMBERS {
            let Some(persona) = Persona::for_kind(kind) else {
                continue;
            };
            let agent: AgentHandle = Arc::new(LlmAgent::new(persona, resources.clone()));
            members.push((kind, agent.clone()));
            registry = registry.with_agent(kind, agent);
        }

        let team: AgentHandle = Arc::new(TeamAgent::new(members, resources));
        registry.with_agent(AgentKind::Team, team)
    }

    /// Look up an agent by its wire identifier.
    pub fn resolve(&self, agent_type: &str) -> Result<(AgentKind, AgentHandle), RegistryError> {
        let kind: AgentKind = agent_type
            .parse()
            .map_err(|_| RegistryError::NotFound(agent_type.to_string()))?;
        self.get(kind)
            .map(|agent| (kind, agent))
            .ok_or_else(|| RegistryError::NotFound(agent_type.to_string()))
    }

    pub fn get(&self, kind: AgentKind) -> Option<AgentHandle> {
        self.agents.get(&kind).cloned()
    }

    /// Registered identifiers in advertised order.
    pub fn kinds(&self) -> Vec<AgentKind> {
        self.agents.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
