use shutter_core::{ConnectionError, DecodeError, ServerMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// What the signaling client reports, in receipt order.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalingEvent {
    Connected,
    /// `reason` is `None` when the disconnect was requested locally.
    Disconnected { reason: Option<ConnectionError> },
    Message(ServerMessage),
    /// A frame that failed to decode. It was dropped; the link is still up.
    DecodeFailed(DecodeError),
}
