use crate::channel::{ChannelSink, ChannelStream, SignalingChannel};
use crate::signaling::{ConnectionState, SignalingEvent};
use futures::{SinkExt, StreamExt};
use shutter_core::{
    ClientMessage, ConnectionError, HandshakeMessage, PeerId, Recipient, RoomId, RoomPayload,
    SendError, ServerMessage, codec,
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Anything that can put a room broadcast on the wire.
pub trait Outbox {
    fn broadcast(&self, payload: RoomPayload) -> Result<(), SendError>;
}

struct Link {
    outbound: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

/// Owns one connection to the rendezvous server.
///
/// Outgoing frames are queued and written by a single I/O task, which also
/// reads, decodes and forwards incoming frames as [`SignalingEvent`]s.
pub struct SignalingClient {
    peer_id: PeerId,
    channel: Arc<dyn SignalingChannel>,
    events: mpsc::UnboundedSender<SignalingEvent>,
    state: Arc<watch::Sender<ConnectionState>>,
    link: Option<Link>,
}

impl SignalingClient {
    pub fn new(
        peer_id: PeerId,
        channel: Arc<dyn SignalingChannel>,
        events: mpsc::UnboundedSender<SignalingEvent>,
    ) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            peer_id,
            channel,
            events,
            state: Arc::new(state),
            link: None,
        }
    }

    pub fn peer_id(&self) -> PeerId {
        self.peer_id
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Opens the channel. A no-op while already connected.
    pub async fn connect(&mut self) -> Result<(), ConnectionError> {
        if self.is_connected() {
            return Ok(());
        }
        if let Some(stale) = self.link.take() {
            stale.task.abort();
        }

        self.state.send_replace(ConnectionState::Connecting);
        let (sink, stream) = match self.channel.open(self.peer_id).await {
            Ok(halves) => halves,
            Err(e) => {
                warn!("Failed to connect {}: {}", self.peer_id, e);
                self.state.send_replace(ConnectionState::Disconnected);
                return Err(e);
            }
        };

        info!("Peer {} connected to rendezvous", self.peer_id);
        self.state.send_replace(ConnectionState::Connected);
        let _ = self.events.send(SignalingEvent::Connected);

        let (outbound, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(pump(
            sink,
            stream,
            rx,
            self.events.clone(),
            self.state.clone(),
        ));
        self.link = Some(Link { outbound, task });
        Ok(())
    }

    /// Drops the connection. Frames still queued are discarded.
    pub fn disconnect(&mut self) {
        if let Some(link) = self.link.take() {
            link.task.abort();
        }
        mark_disconnected(&self.state, &self.events, None);
    }

    /// Queues a handshake for `to`. Never waits for delivery.
    pub fn send(&self, handshake: HandshakeMessage, to: Recipient) -> Result<(), SendError> {
        self.send_message(&ClientMessage::Signal { to, handshake })
    }

    pub fn join(&self, room: RoomId, nickname: impl Into<String>) -> Result<(), SendError> {
        self.send_message(&ClientMessage::Join {
            room,
            nickname: nickname.into(),
        })
    }

    pub fn send_message(&self, message: &ClientMessage) -> Result<(), SendError> {
        let link = match &self.link {
            Some(link) if self.is_connected() => link,
            _ => return Err(SendError::NotConnected),
        };
        let text = codec::encode(message)?;
        link.outbound
            .send(text)
            .map_err(|_| SendError::NotConnected)
    }
}

impl Outbox for SignalingClient {
    fn broadcast(&self, payload: RoomPayload) -> Result<(), SendError> {
        self.send_message(&ClientMessage::Broadcast { payload })
    }
}

impl Drop for SignalingClient {
    fn drop(&mut self) {
        if let Some(link) = self.link.take() {
            link.task.abort();
        }
    }
}

fn mark_disconnected(
    state: &watch::Sender<ConnectionState>,
    events: &mpsc::UnboundedSender<SignalingEvent>,
    reason: Option<ConnectionError>,
) {
    let previous = state.send_replace(ConnectionState::Disconnected);
    if previous != ConnectionState::Disconnected {
        let _ = events.send(SignalingEvent::Disconnected { reason });
    }
}

async fn pump(
    mut sink: ChannelSink,
    mut stream: ChannelStream,
    mut outbound: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<SignalingEvent>,
    state: Arc<watch::Sender<ConnectionState>>,
) {
    let reason = loop {
        tokio::select! {
            frame = outbound.recv() => match frame {
                Some(text) => {
                    if let Err(e) = sink.send(text).await {
                        break Some(e);
                    }
                }
                None => break None,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(text)) => dispatch(&events, &text),
                Some(Err(e)) => break Some(e),
                None => break Some(ConnectionError::Closed),
            },
        }
    };

    match &reason {
        Some(e) => warn!("Signaling link lost: {}", e),
        None => debug!("Signaling link released"),
    }
    let _ = sink.close().await;
    mark_disconnected(&state, &events, reason);
}

fn dispatch(events: &mpsc::UnboundedSender<SignalingEvent>, text: &str) {
    let event = match codec::decode::<ServerMessage>(text) {
        Ok(message) => SignalingEvent::Message(message),
        Err(e) => {
            warn!("Dropping inbound frame: {}", e);
            SignalingEvent::DecodeFailed(e)
        }
    };
    let _ = events.send(event);
}
