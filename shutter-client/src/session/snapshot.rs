use crate::signaling::ConnectionState;
use shutter_core::{
    FrameKind, PeerId, PeerIdentity, Position, RoomId, RoomMember, RoomPhase, Sticker,
};

/// Read-only view of a session, republished after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub room: RoomId,
    pub local: PeerIdentity,
    pub connection: ConnectionState,
    /// `None` until the server has seated us.
    pub host: Option<PeerId>,
    pub capacity: usize,
    pub phase: RoomPhase,
    /// Ordered by position.
    pub roster: Vec<RoomMember>,
    pub stickers: Vec<Sticker>,
    pub frame: FrameKind,
}

impl SessionSnapshot {
    pub fn local_member(&self) -> Option<&RoomMember> {
        self.roster.iter().find(|m| m.identity.id == self.local.id)
    }

    pub fn member_at(&self, position: Position) -> Option<&RoomMember> {
        self.roster.iter().find(|m| m.position == position)
    }

    pub fn is_host(&self) -> bool {
        self.host == Some(self.local.id)
    }
}
