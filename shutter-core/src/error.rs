//! Error taxonomy shared by the client and the rendezvous server.

use crate::model::{PeerId, Position};
use thiserror::Error;

/// The rendezvous service could not be reached, or the link dropped.
/// Recoverable by reconnecting; never fatal to room state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("rendezvous unreachable: {0}")]
    Unreachable(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("connection closed")]
    Closed,
}

/// A message could not be queued for sending. Never retried by the core.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("not connected to the rendezvous service")]
    NotConnected,

    #[error("failed to encode message: {0}")]
    Encode(String),
}

/// An inbound frame that could not be decoded. The frame is dropped and the
/// channel stays open.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed signaling frame ({len} bytes): {reason}")]
pub struct DecodeError {
    pub reason: String,
    pub len: usize,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("room is full ({capacity} seats)")]
pub struct RoomFullError {
    pub capacity: usize,
}

/// The external "create room" call failed. No state is mutated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoomCreationError {
    #[error("create room request failed: {0}")]
    Request(String),

    #[error("create room rejected with status {status}")]
    Rejected { status: u16 },

    #[error("invalid create room response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MembershipError {
    #[error(transparent)]
    RoomFull(#[from] RoomFullError),

    #[error("position {position} already held by {holder}")]
    PositionConflict { position: Position, holder: PeerId },

    #[error("peer {peer} is seated at {seated}, cannot move to {requested}")]
    Reassignment {
        peer: PeerId,
        seated: Position,
        requested: Position,
    },

    #[error("position {position} outside room capacity {capacity}")]
    OutOfRange { position: Position, capacity: usize },

    #[error("peer {peer} cannot take the host seat")]
    HostSeat { peer: PeerId },
}

impl MembershipError {
    /// Returns true if this error means two views of the roster disagree.
    ///
    /// Such a disagreement can only come from a protocol bug, so the session
    /// holding the roster must stop.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::RoomFull(_) => false,
            Self::PositionConflict { .. }
            | Self::Reassignment { .. }
            | Self::OutOfRange { .. }
            | Self::HostSeat { .. } => true,
        }
    }
}
