//! Text-frame transports to the rendezvous server.

mod memory;
mod websocket;

pub use memory::*;
pub use websocket::*;

use async_trait::async_trait;
use futures::{Sink, Stream};
use shutter_core::{ConnectionError, PeerId};
use std::pin::Pin;

pub type ChannelSink = Pin<Box<dyn Sink<String, Error = ConnectionError> + Send>>;
pub type ChannelStream = Pin<Box<dyn Stream<Item = Result<String, ConnectionError>> + Send>>;

/// Opens one bidirectional text connection for `peer_id`.
///
/// The stream ends when the remote side closes; an `Err` item means the link
/// broke. Either way the connection is finished.
#[async_trait]
pub trait SignalingChannel: Send + Sync {
    async fn open(&self, peer_id: PeerId) -> Result<(ChannelSink, ChannelStream), ConnectionError>;
}
