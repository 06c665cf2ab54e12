//! Agent identifiers and the collaborator response shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of agents a client may address.
///
/// `Team` is the composite that coordinates the three single agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Research,
    Analyze,
    General,
    Team,
}

impl AgentKind {
    /// Every valid identifier, in the order they are advertised to clients.
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Research,
        AgentKind::Analyze,
        AgentKind::General,
        AgentKind::Team,
    ];

    /// The single (non-composite) agents that make up the team.
    pub const MEMBERS: [AgentKind; 3] =
        [AgentKind::Research, AgentKind::Analyze, AgentKind::General];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Research => "research",
            AgentKind::Analyze => "analyze",
            AgentKind::General => "general",
            AgentKind::Team => "team",
        }
    }

    pub fn is_team(&self) -> bool {
        matches!(self, AgentKind::Team)
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = String;

    /// Identifiers are matched exactly; `"Team"` is not `"team"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "research" => Ok(AgentKind::Research),
            "analyze" => Ok(AgentKind::Analyze),
            "general" => Ok(AgentKind::General),
            "team" => Ok(AgentKind::Team),
            other => Err(format!("invalid agent type: '{other}'")),
        }
    }
}

/// What an agent hands back from a single `run`.
///
/// `content` is `None` when the underlying framework produced no text
/// (for example a turn that only invoked tools).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub content: Option<String>,
}

impl AgentResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    /// A run that produced nothing to show.
    pub fn empty() -> Self {
        Self { content: None }
    }
}
