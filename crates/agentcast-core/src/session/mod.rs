//! Streaming session: one inbound message, one agent call, a paced stream
//! of outbound events.
//!
//! The session logic is transport-free. It talks to the client through
//! [`SessionTransport`], which the API crate implements over a WebSocket
//! and the tests implement over channels.

pub mod attachment;
pub mod chunker;
pub mod handler;
pub mod transport;

pub use handler::{SessionConfig, SessionOutcome, StreamingSession};
pub use transport::SessionTransport;
