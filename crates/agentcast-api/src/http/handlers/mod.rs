//! HTTP and WebSocket request handlers.

pub mod agents;
pub mod artifacts;
pub mod ws;
