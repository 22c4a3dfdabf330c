use async_trait::async_trait;
use shutter_core::{PeerId, ServerMessage};

/// Implemented by whatever holds the peer sockets, so that rooms can talk to
/// peers without knowing about WebSockets.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Queue a message for one peer. Order per peer is preserved.
    async fn deliver(&self, peer_id: PeerId, message: ServerMessage);
}
