//! Team composite: consults every member agent, then has the coordinator
//! model merge their contributions into one answer.

use std::sync::Arc;

use tracing::{debug, info_span, warn};

use agentcast_types::agent::{AgentKind, AgentResponse};
use agentcast_types::error::AgentError;
use agentcast_types::llm::Message;

use super::resources::AgentResources;
use super::{Agent, AgentHandle};

/// Name the team records its own history under.
pub const TEAM_NAME: &str = "Team";

const TEAM_INSTRUCTIONS: &str = "You are a coordinated team of specialists working together. \
    Research Agent: Handle information gathering and web searches. \
    Analysis Agent: Handle calculations, data analysis, and reasoning. \
    General Assistant: Provide comprehensive general assistance. \
    Work together to provide accurate, well-researched responses. \
    Use file generation tools when needed to export results.\n\n\
    You receive the specialists' contributions below the user's request. Merge them into one \
    answer for the user; do not mention the specialists by name. \
    Format your responses using markdown.";

/// One member's answer (or failure) to the shared query.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Contribution {
    member: String,
    outcome: Result<String, String>,
}

pub struct TeamAgent {
    members: Vec<(AgentKind, AgentHandle)>,
    resources: Arc<AgentResources>,
}

impl TeamAgent {
    pub fn new(members: Vec<(AgentKind, AgentHandle)>, resources: Arc<AgentResources>) -> Self {
        Self { members, resources }
    }

    pub fn member_kinds(&self) -> Vec<AgentKind> {
        self.members.iter().map(|(kind, _)| *kind).collect()
    }

    fn consult(&self, query: &str, identity: &str) -> Vec<Contribution> {
        self.members
            .iter()
            .filter_map(|(kind, agent)| {
                let _span = info_span!("team.member", member = %kind).entered();
                let outcome = match agent.run(query, identity) {
                    Ok(AgentResponse { content: Some(text) }) => Ok(text),
                    Ok(AgentResponse { content: None }) => return None,
                    Err(e) => {
                        warn!(member = %kind, error = %e, "team member failed");
                        Err(e.to_string())
                    }
                };
                Some(Contribution {
                    member: agent.name().to_string(),
                    outcome,
                })
            })
            .collect()
    }
}

/// Render the coordinator's user turn: the request followed by each
/// member's contribution.
fn synthesis_prompt(query: &str, contributions: &[Contribution]) -> String {
    let mut prompt = format!("User request:\n{query}\n");
    for c in contributions {
        match &c.outcome {
            Ok(text) => prompt.push_str(&format!("\n--- {} ---\n{text}\n", c.member)),
            Err(e) => prompt.push_str(&format!("\n--- {} ---\n[unavailable: {e}]\n", c.member)),
        }
    }
    prompt
}

impl Agent for TeamAgent {
    fn name(&self) -> &str {
        TEAM_NAME
    }

    fn run(&self, query: &str, identity: &str) -> Result<AgentResponse, AgentError> {
        let contributions = self.consult(query, identity);

        if contributions.is_empty() {
            return Ok(AgentResponse::empty());
        }
        if contributions.iter().all(|c| c.outcome.is_err()) {
            let first = &contributions[0];
            return Err(AgentError::Member {
                member: first.member.clone(),
                message: first.outcome.clone().err().unwrap_or_default(),
            });
        }

        debug!(
            contributions = contributions.len(),
            "synthesizing team answer"
        );

        let mut messages = self.resources.memory.history(TEAM_NAME, identity);
        messages.push(Message::user(synthesis_prompt(query, &contributions)));
        let request = self
            .resources
            .request(TEAM_INSTRUCTIONS.to_string(), messages);

        let response = self
            .resources
            .complete_blocking(&request)
            .map_err(|e| AgentError::Model(e.to_string()))?;

        if response.content.is_empty() {
            return Ok(AgentResponse::empty());
        }

        self.resources
            .memory
            .record(TEAM_NAME, identity, query, &response.content);
        Ok(AgentResponse::text(response.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::resources::testing::{ScriptedProvider, resources};

    struct Fixed {
        name: &'static str,
        reply: Result<Option<&'static str>, &'static str>,
    }

    impl Agent for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn run(&self, _query: &str, _identity: &str) -> Result<AgentResponse, AgentError> {
            match self.reply {
                Ok(Some(text)) => Ok(AgentResponse::text(text)),
                Ok(None) => Ok(AgentResponse::empty()),
                Err(e) => Err(AgentError::Model(e.to_string())),
            }
        }
    }

    fn member(
        kind: AgentKind,
        name: &'static str,
        reply: Result<Option<&'static str>, &'static str>,
    ) -> (AgentKind, AgentHandle) {
        (kind, Arc::new(Fixed { name, reply }))
    }

    #[test]
    fn test_synthesis_prompt_lists_contributions() {
        let prompt = synthesis_prompt(
            "q",
            &[
                Contribution {
                    member: "ResearchAgent".to_string(),
                    outcome: Ok("facts".to_string()),
                },
                Contribution {
                    member: "AnalysisAgent".to_string(),
                    outcome: Err("boom".to_string()),
                },
            ],
        );
        assert!(prompt.starts_with("User request:\nq\n"));
        assert!(prompt.contains("--- ResearchAgent ---\nfacts"));
        assert!(prompt.contains("--- AnalysisAgent ---\n[unavailable: boom]"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_team_synthesizes_member_answers() {
        let provider = ScriptedProvider::new(|_| Ok("merged".to_string()));
        let seen = provider.seen.clone();
        let team = Arc::new(TeamAgent::new(
            vec![
                member(AgentKind::Research, "ResearchAgent", Ok(Some("facts"))),
                member(AgentKind::Analyze, "AnalysisAgent", Err("boom")),
                member(AgentKind::General, "GeneralAssistant", Ok(None)),
            ],
            resources(provider),
        ));

        let response = tokio::task::spawn_blocking(move || team.run("q", "u1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(response.content.as_deref(), Some("merged"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let prompt = &seen[0].messages.last().unwrap().content;
        assert!(prompt.contains("facts"));
        assert!(prompt.contains("[unavailable: boom]"));
        assert!(!prompt.contains("GeneralAssistant"));
    }

    #[test]
    fn test_all_members_failing_is_an_error() {
        let provider = ScriptedProvider::new(|_| Ok("unused".to_string()));
        let rt = tokio::runtime::Runtime::new().unwrap();
        let resources = rt.block_on(async { resources(provider) });
        let team = TeamAgent::new(
            vec![
                member(AgentKind::Research, "ResearchAgent", Err("down")),
                member(AgentKind::Analyze, "AnalysisAgent", Err("down")),
            ],
            resources,
        );

        let err = team.run("q", "u1").unwrap_err();
        assert!(matches!(err, AgentError::Member { ref member, .. } if member == "ResearchAgent"));
    }

    #[test]
    fn test_no_member_content_is_empty_response() {
        let provider = ScriptedProvider::new(|_| Ok("unused".to_string()));
        let rt = tokio::runtime::Runtime::new().unwrap();
        let resources = rt.block_on(async { resources(provider) });
        let team = TeamAgent::new(
            vec![member(AgentKind::General, "GeneralAssistant", Ok(None))],
            resources,
        );

        assert!(team.run("q", "u1").unwrap().content.is_none());
        assert_eq!(team.member_kinds(), vec![AgentKind::General]);
    }
}
