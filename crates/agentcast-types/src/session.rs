//! Streaming session wire format.
//!
//! A client sends exactly one [`InboundMessage`] as a JSON text frame and
//! receives a sequence of [`OutboundEvent`]s:
//!
//! ```json
//! {"type":"thinking","content":"Processing your request..."}
//! {"type":"chunk","content":"Hello "}
//! {"type":"chunk","content":"world"}
//! {"type":"done"}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identity used when the client does not supply a `session_id`.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Status text carried by the `thinking` event.
pub const THINKING_MESSAGE: &str = "Processing your request...";

/// The one message a client sends after opening a session.
///
/// Every field is optional at the serde level so that a payload missing
/// `agent_type` or `query` still parses and can be rejected with a
/// descriptive [`ValidationError`] instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub agent_type: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub attached_file: Option<String>,
}

/// An [`InboundMessage`] whose required fields are present and non-empty.
///
/// `agent_type` is still the raw string; resolving it against the registry
/// is a separate step with its own error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMessage {
    pub agent_type: String,
    pub query: String,
    pub session_id: String,
    pub attached_file: Option<String>,
}

impl InboundMessage {
    /// Check required fields and fill in defaults.
    pub fn validate(self) -> Result<ValidatedMessage, ValidationError> {
        let agent_type = self.agent_type.filter(|s| !s.is_empty());
        let query = self.query.filter(|s| !s.is_empty());

        let (Some(agent_type), Some(query)) = (agent_type, query) else {
            return Err(ValidationError::MissingFields);
        };

        let session_id = self
            .session_id
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());
        let attached_file = self.attached_file.filter(|s| !s.is_empty());

        Ok(ValidatedMessage {
            agent_type,
            query,
            session_id,
            attached_file,
        })
    }
}

/// A message pushed to the client during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundEvent {
    /// The agent call is about to start.
    Thinking { content: String },
    /// One word of the answer, with its trailing space if it has one.
    Chunk { content: String },
    /// The answer is complete.
    Done,
    /// The session failed; no further events follow.
    Error { content: String },
}

impl OutboundEvent {
    pub fn thinking() -> Self {
        OutboundEvent::Thinking {
            content: THINKING_MESSAGE.to_string(),
        }
    }

    pub fn chunk(content: impl Into<String>) -> Self {
        OutboundEvent::Chunk {
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        OutboundEvent::Error {
            content: content.into(),
        }
    }

    /// `done` and `error` end a session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OutboundEvent::Done | OutboundEvent::Error { .. })
    }
}
