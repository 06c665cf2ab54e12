//! The duplex channel a session runs over.

use std::future::Future;

use agentcast_types::error::TransportError;
use agentcast_types::session::OutboundEvent;

/// A message-oriented duplex connection to one client.
///
/// Uses RPITIT; the session is generic over its transport so no boxing is
/// needed.
pub trait SessionTransport: Send {
    /// Next text frame from the client, or `None` once the peer has closed.
    ///
    /// Non-text frames are skipped by implementations.
    fn recv_text(&mut self) -> impl Future<Output = Result<Option<String>, TransportError>> + Send;

    /// Serialize and send one event.
    fn send_event(
        &mut self,
        event: &OutboundEvent,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Close the connection. Closing an already-closed transport is a no-op.
    fn close(&mut self) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Resolve once the peer has gone away.
    ///
    /// Anything the client sends after its first message is ignored.
    fn wait_closed(&mut self) -> impl Future<Output = ()> + Send {
        async move {
            loop {
                match self.recv_text().await {
                    Ok(Some(_)) => continue,
                    Ok(None) | Err(_) => return,
                }
            }
        }
    }
}
