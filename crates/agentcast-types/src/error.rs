use std::time::Duration;

use thiserror::Error;

/// Errors raised while checking an inbound session message.
///
/// The display strings are sent verbatim to clients in `error` events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing agent_type or query")]
    MissingFields,

    #[error("Invalid agent_type")]
    InvalidAgentType(String),

    #[error("Invalid message: {0}")]
    Malformed(String),
}

/// Errors from looking up an agent by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("agent '{0}' not found")]
    NotFound(String),
}

/// Errors from artifact store operations.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("file '{0}' not found")]
    NotFound(String),

    #[error("invalid filename '{0}': must not contain path separators or '..'")]
    InvalidName(String),

    #[error("file exceeds maximum size of {max} bytes (got {size} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("file '{0}' is not valid UTF-8 text")]
    NotText(String),

    #[error("io error: {0}")]
    Io(String),
}

/// Errors raised by an agent's `run`.
#[derive(Debug, Clone, Error)]
pub enum AgentError {
    #[error("{0}")]
    Model(String),

    #[error("team member '{member}' failed: {message}")]
    Member { member: String, message: String },

    #[error("{0}")]
    Other(String),
}

/// Errors at the boundary between the async runtime and the blocking agent call.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("agent panicked: {0}")]
    Panicked(String),

    #[error("agent invocation timed out after {0:?}")]
    TimedOut(Duration),

    #[error("agent invocation was cancelled")]
    Cancelled,
}

/// Errors from the bidirectional channel carrying a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("peer disconnected")]
    Disconnected,

    #[error("transport error: {0}")]
    Other(String),
}
