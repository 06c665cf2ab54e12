//! The streaming session state machine.
//!
//! ```text
//! recv message ─► validate ─► resolve agent ─► thinking
//!      │              │             │              │
//!      ▼              ▼             ▼              ▼
//!  (peer gone)     error         error      augment query
//!                                                  │
//!                                      dispatch (raced against close)
//!                                                  │
//!                                 chunk, pause, chunk, pause ... done
//! ```
//!
//! Every path ends with the transport closed. A client that disconnects
//! mid-session stops the stream without an error being raised; the agent
//! call itself runs to completion on the blocking pool.

use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, Span, debug, field, info, info_span, warn};

use agentcast_types::error::{TransportError, ValidationError};
use agentcast_types::session::{InboundMessage, OutboundEvent};

use crate::agent::registry::AgentRegistry;
use crate::dispatch::AgentDispatcher;
use crate::storage::artifact_store::ArtifactStore;

use super::attachment::augment_query;
use super::chunker::split_words;
use super::transport::SessionTransport;

/// Per-session tunables.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Pause after each `chunk` event. Zero disables pacing.
    pub chunk_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chunk_delay: Duration::from_millis(30),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The full answer was streamed and `done` was sent.
    Completed { chunks: usize },
    /// The inbound message was refused with an `error` event.
    Rejected(ValidationError),
    /// The client went away before the stream finished.
    Disconnected,
    /// Something unexpected broke the session.
    Failed(String),
}

enum SessionFailure {
    Disconnected,
    Unexpected(String),
}

impl From<TransportError> for SessionFailure {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Disconnected => SessionFailure::Disconnected,
            other => SessionFailure::Unexpected(other.to_string()),
        }
    }
}

/// Serves one client message per connection.
pub struct StreamingSession<S> {
    registry: Arc<AgentRegistry>,
    dispatcher: AgentDispatcher,
    artifacts: Arc<S>,
    config: SessionConfig,
}

impl<S> Clone for StreamingSession<S> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            dispatcher: self.dispatcher.clone(),
            artifacts: self.artifacts.clone(),
            config: self.config,
        }
    }
}

impl<S: ArtifactStore> StreamingSession<S> {
    pub fn new(
        registry: Arc<AgentRegistry>,
        dispatcher: AgentDispatcher,
        artifacts: Arc<S>,
        config: SessionConfig,
    ) -> Self {
        Self {
            registry,
            dispatcher,
            artifacts,
            config,
        }
    }

    /// Run the session to completion over `transport`, then close it.
    pub async fn run<T: SessionTransport>(&self, transport: &mut T) -> SessionOutcome {
        let span = info_span!(
            "session",
            agent = field::Empty,
            session_id = field::Empty
        );

        async {
            let outcome = match self.drive(transport).await {
                Ok(outcome) => outcome,
                Err(SessionFailure::Disconnected) => SessionOutcome::Disconnected,
                Err(SessionFailure::Unexpected(message)) => {
                    warn!(error = %message, "session failed");
                    if let Err(e) = transport.send_event(&OutboundEvent::error(&message)).await {
                        debug!(error = %e, "could not report session failure to client");
                    }
                    SessionOutcome::Failed(message)
                }
            };

            if let Err(e) = transport.close().await {
                debug!(error = %e, "close after session");
            }

            match &outcome {
                SessionOutcome::Completed { chunks } => info!(chunks, "session completed"),
                SessionOutcome::Rejected(reason) => info!(reason = %reason, "session rejected"),
                SessionOutcome::Disconnected => info!("client disconnected"),
                SessionOutcome::Failed(_) => {}
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn drive<T: SessionTransport>(
        &self,
        transport: &mut T,
    ) -> Result<SessionOutcome, SessionFailure> {
        let Some(text) = transport.recv_text().await? else {
            return Err(SessionFailure::Disconnected);
        };

        let inbound: InboundMessage = match serde_json::from_str(&text) {
            Ok(inbound) => inbound,
            Err(e) => return reject(transport, ValidationError::Malformed(e.to_string())).await,
        };
        let message = match inbound.validate() {
            Ok(message) => message,
            Err(e) => return reject(transport, e).await,
        };
        let (kind, agent) = match self.registry.resolve(&message.agent_type) {
            Ok(found) => found,
            Err(_) => {
                return reject(transport, ValidationError::InvalidAgentType(message.agent_type))
                    .await;
            }
        };

        Span::current()
            .record("agent", kind.as_str())
            .record("session_id", message.session_id.as_str());

        transport.send_event(&OutboundEvent::thinking()).await?;

        let query = match &message.attached_file {
            Some(filename) => augment_query(self.artifacts.as_ref(), &message.query, filename).await,
            None => message.query,
        };

        let dispatch = self
            .dispatcher
            .invoke_to_text(agent, query, message.session_id);
        let answer = tokio::select! {
            answer = dispatch => answer,
            () = transport.wait_closed() => return Err(SessionFailure::Disconnected),
        };

        let mut chunks = 0;
        for word in split_words(&answer) {
            transport.send_event(&OutboundEvent::chunk(word)).await?;
            chunks += 1;

            if !self.config.chunk_delay.is_zero() {
                tokio::select! {
                    () = tokio::time::sleep(self.config.chunk_delay) => {}
                    () = transport.wait_closed() => return Err(SessionFailure::Disconnected),
                }
            }
        }

        transport.send_event(&OutboundEvent::Done).await?;
        Ok(SessionOutcome::Completed { chunks })
    }
}

async fn reject<T: SessionTransport>(
    transport: &mut T,
    reason: ValidationError,
) -> Result<SessionOutcome, SessionFailure> {
    transport
        .send_event(&OutboundEvent::error(reason.to_string()))
        .await?;
    Ok(SessionOutcome::Rejected(reason))
}
