use crate::model::frame::FrameKind;
use crate::model::handshake::{HandshakeMessage, Recipient};
use crate::model::lifecycle::LifecycleEvent;
use crate::model::member::RoomMember;
use crate::model::peer::PeerId;
use crate::model::room::RoomId;
use crate::model::sticker::Sticker;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

/// Replicated room state and lifecycle, broadcast to every other member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum RoomPayload {
    Lifecycle(LifecycleEvent),
    /// Always the full collection, never a delta.
    Stickers(Vec<Sticker>),
    Frame(FrameKind),
}

/// Frames a peer sends to the rendezvous server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d")]
pub enum ClientMessage {
    Join {
        room: RoomId,
        nickname: String,
    },
    Signal {
        to: Recipient,
        handshake: HandshakeMessage,
    },
    Broadcast {
        payload: RoomPayload,
    },
}

/// Frames the rendezvous server sends to a peer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d")]
pub enum ServerMessage {
    IceConfig {
        ice_servers: Vec<IceServerConfig>,
    },
    Welcome {
        peer_id: PeerId,
        host: PeerId,
        capacity: usize,
        member: RoomMember,
        roster: Vec<RoomMember>,
    },
    RoomFull {
        room: RoomId,
        capacity: usize,
    },
    UnknownRoom {
        room: RoomId,
    },
    PeerJoined {
        member: RoomMember,
    },
    PeerLeft {
        member: RoomMember,
    },
    Signal {
        from: PeerId,
        handshake: HandshakeMessage,
    },
    Broadcast {
        from: PeerId,
        payload: RoomPayload,
    },
}
