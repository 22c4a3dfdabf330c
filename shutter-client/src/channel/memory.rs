use crate::channel::{ChannelSink, ChannelStream, SignalingChannel};
use async_trait::async_trait;
use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use shutter_core::{
    ClientMessage, ConnectionError, DecodeError, PeerId, SendError, ServerMessage, codec,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// In-process [`SignalingChannel`]. Every successful `open` hands the other
/// end of the connection to whoever holds the link receiver.
pub struct MemoryChannel {
    links: mpsc::UnboundedSender<MemoryLink>,
    refusing: AtomicBool,
}

impl MemoryChannel {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MemoryLink>) {
        let (links, rx) = mpsc::unbounded();
        let channel = Self {
            links,
            refusing: AtomicBool::new(false),
        };
        (channel, rx)
    }

    /// While set, `open` fails with [`ConnectionError::Unreachable`].
    pub fn set_refusing(&self, refusing: bool) {
        self.refusing.store(refusing, Ordering::SeqCst);
    }
}

#[async_trait]
impl SignalingChannel for MemoryChannel {
    async fn open(&self, peer_id: PeerId) -> Result<(ChannelSink, ChannelStream), ConnectionError> {
        if self.refusing.load(Ordering::SeqCst) {
            return Err(ConnectionError::Unreachable(
                "memory channel is refusing connections".to_owned(),
            ));
        }

        let (client_tx, server_rx) = mpsc::unbounded::<String>();
        let (server_tx, client_rx) = mpsc::unbounded::<Result<String, ConnectionError>>();

        self.links
            .unbounded_send(MemoryLink {
                peer_id,
                inbound: server_rx,
                outbound: server_tx,
            })
            .map_err(|_| ConnectionError::Unreachable("nobody is listening".to_owned()))?;

        let sink = client_tx.sink_map_err(|_| ConnectionError::Closed);
        Ok((Box::pin(sink), Box::pin(client_rx)))
    }
}

/// The server side of one in-memory connection.
pub struct MemoryLink {
    pub peer_id: PeerId,
    inbound: mpsc::UnboundedReceiver<String>,
    outbound: mpsc::UnboundedSender<Result<String, ConnectionError>>,
}

impl MemoryLink {
    /// Next raw frame the client sent, `None` once it hung up.
    pub async fn recv_raw(&mut self) -> Option<String> {
        self.inbound.next().await
    }

    /// Next frame the client sent, decoded.
    pub async fn recv(&mut self) -> Option<Result<ClientMessage, DecodeError>> {
        let text = self.recv_raw().await?;
        Some(codec::decode(&text))
    }

    pub fn send(&self, message: &ServerMessage) -> Result<(), SendError> {
        self.send_raw(codec::encode(message)?)
    }

    pub fn send_raw(&self, text: impl Into<String>) -> Result<(), SendError> {
        self.outbound
            .unbounded_send(Ok(text.into()))
            .map_err(|_| SendError::NotConnected)
    }

    /// Breaks the link from the server side with `error`.
    pub fn fail(&self, error: ConnectionError) {
        let _ = self.outbound.unbounded_send(Err(error));
    }

    /// Closes the link cleanly, as if the server hung up.
    pub fn close(self) {
        self.outbound.close_channel();
    }
}
