//! Peer side of a Shutter room: signaling client, replicated room state,
//! lifecycle bus and the session actor tying them together.

pub mod channel;
mod config;
mod error;
mod event;
pub mod lifecycle;
mod room_creator;
mod session;
pub mod signaling;
pub mod state;

pub use channel::{MemoryChannel, MemoryLink, SignalingChannel, WebSocketChannel};
pub use config::*;
pub use error::*;
pub use event::*;
pub use room_creator::*;
pub use session::*;
pub use signaling::{ConnectionState, SignalingClient, SignalingEvent};
