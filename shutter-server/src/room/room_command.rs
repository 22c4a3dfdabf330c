use shutter_core::{HandshakeMessage, PeerId, PeerIdentity, Recipient, RoomPayload};

/// Commands a room receives from the signaling layer (WebSocket handler).
#[derive(Debug)]
pub enum RoomCommand {
    /// A peer asked for a seat.
    Join { peer: PeerIdentity },

    /// Handshake to forward to one peer or to everybody else in the room.
    Relay {
        from: PeerId,
        to: Recipient,
        handshake: HandshakeMessage,
    },

    /// Replicated state or lifecycle event for everybody else in the room.
    Broadcast { from: PeerId, payload: RoomPayload },

    /// The peer's socket closed.
    Disconnect { peer_id: PeerId },
}
