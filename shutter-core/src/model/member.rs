use crate::model::peer::{PeerId, PeerIdentity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat index inside a room. Position 0 belongs to the host.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct Position(pub u8);

impl Position {
    pub const HOST: Position = Position(0);

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn is_host(self) -> bool {
        self == Self::HOST
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
pub struct RoomMember {
    pub identity: PeerIdentity,
    pub position: Position,
    /// Unix time in milliseconds at which the join was observed.
    pub joined_at: u64,
}

impl RoomMember {
    pub fn peer_id(&self) -> PeerId {
        self.identity.id
    }

    pub fn nickname(&self) -> &str {
        &self.identity.nickname
    }
}

pub fn unix_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
