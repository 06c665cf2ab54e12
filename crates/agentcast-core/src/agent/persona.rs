//! Built-in agent personas.
//!
//! A persona is the fixed part of an agent: its display name and the
//! instructions that become the model's system prompt.

use agentcast_types::agent::AgentKind;

const SEARCH_INSTRUCTION: &str = "To search the web for up-to-date information, use the search \
    tools available to you. Provide detailed, well-sourced responses with clear citations.";

const FILE_GEN_INSTRUCTION: &str = "When appropriate, use file generation tools to create and \
    export files like JSON, CSV, PDF, or text. Specify meaningful filenames and explain the \
    generated content.";

const MARKDOWN_INSTRUCTION: &str = "Format your responses using markdown.";

/// Name and instructions for one single agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub kind: AgentKind,
    pub name: &'static str,
    pub instructions: String,
}

impl Persona {
    /// The persona for a single agent; `None` for the team composite.
    pub fn for_kind(kind: AgentKind) -> Option<Self> {
        match kind {
            AgentKind::Research => Some(Self::research()),
            AgentKind::Analyze => Some(Self::analyze()),
            AgentKind::General => Some(Self::general()),
            AgentKind::Team => None,
        }
    }

    pub fn research() -> Self {
        Self {
            kind: AgentKind::Research,
            name: "ResearchAgent",
            instructions: format!(
                "You are an expert research specialist with access to web search capabilities \
                 and knowledge base. Your primary goal is to research current information, \
                 trends, and developments. {SEARCH_INSTRUCTION} {FILE_GEN_INSTRUCTION} Focus on \
                 providing accurate research with proper citations and references. Be thorough \
                 but concise in your analysis."
            ),
        }
    }

    pub fn analyze() -> Self {
        Self {
            kind: AgentKind::Analyze,
            name: "AnalysisAgent",
            instructions: format!(
                "You are a data analysis and reasoning expert specializing in calculations and \
                 logical problem solving. Your primary goal is to analyze data, perform \
                 calculations, and break down complex problems step by step. \
                 {FILE_GEN_INSTRUCTION} Always show your reasoning process and methodology. \
                 Provide clear explanations for your analysis."
            ),
        }
    }

    pub fn general() -> Self {
        Self {
            kind: AgentKind::General,
            name: "GeneralAssistant",
            instructions: format!(
                "You are a helpful, intelligent AI assistant with access to various tools and \
                 knowledge base. Your primary goal is to provide comprehensive assistance by \
                 using appropriate tools based on the user's request. {SEARCH_INSTRUCTION} \
                 {FILE_GEN_INSTRUCTION} Be friendly, professional, and thorough in your \
                 responses."
            ),
        }
    }

    /// Instructions plus the shared formatting rule.
    pub fn system_prompt(&self) -> String {
        format!("{}\n\n{MARKDOWN_INSTRUCTION}", self.instructions)
    }
}
