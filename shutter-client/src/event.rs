use crate::signaling::ConnectionState;
use shutter_core::{
    FrameKind, HandshakeMessage, IceServerConfig, LifecycleNotification, MembershipError,
    MembershipEvent, PeerId, Sticker,
};
use std::fmt;

/// Change events published by a room session, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Connection(ConnectionState),
    Membership(MembershipEvent),
    Lifecycle(LifecycleNotification),
    StickersChanged(Vec<Sticker>),
    FrameChanged(FrameKind),
    /// Opaque handshake for the media transport.
    Handshake {
        from: PeerId,
        handshake: HandshakeMessage,
    },
    IceServers(Vec<IceServerConfig>),
    Notice(UserNotice),
    /// Local and server rosters disagree. The session has stopped.
    Fatal(MembershipError),
}

/// Something the person at the screen should be told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserNotice {
    ConnectionLost,
    RoomFull { capacity: usize },
    UnknownRoom,
}

impl fmt::Display for UserNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionLost => f.write_str("Connection to the room was lost."),
            Self::RoomFull { capacity } => {
                write!(f, "This room is full ({capacity} people max).")
            }
            Self::UnknownRoom => f.write_str("This room does not exist or has already closed."),
        }
    }
}
