//! HTTP/WebSocket API layer for agentcast.
//!
//! Axum-based API at `/api/v1/` with envelope response format and
//! permissive CORS.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
