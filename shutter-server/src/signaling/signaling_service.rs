use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use shutter_core::{IceServerConfig, PeerId, ServerMessage, codec};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Identifies one socket of a peer, so a stale socket closing late cannot
/// unregister the peer's newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionId(u64);

struct PeerSocket {
    connection: ConnectionId,
    tx: mpsc::UnboundedSender<Message>,
}

struct SignalingInner {
    peers: DashMap<PeerId, PeerSocket>,
    ice_servers: Vec<IceServerConfig>,
    next_connection: AtomicU64,
}

#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
                ice_servers,
                next_connection: AtomicU64::new(1),
            }),
        }
    }

    pub fn get_ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) -> ConnectionId {
        let connection = ConnectionId(self.inner.next_connection.fetch_add(1, Ordering::Relaxed));
        let previous = self
            .inner
            .peers
            .insert(peer_id, PeerSocket { connection, tx });
        if previous.is_some() {
            warn!("Peer {} reconnected; replacing its previous socket", peer_id);
        }
        connection
    }

    /// Returns `false` when the peer has since registered a newer socket.
    pub fn remove_peer(&self, peer_id: &PeerId, connection: ConnectionId) -> bool {
        self.inner
            .peers
            .remove_if(peer_id, |_, socket| socket.connection == connection)
            .is_some()
    }

    pub fn is_connected(&self, peer_id: &PeerId) -> bool {
        self.inner.peers.contains_key(peer_id)
    }

    pub fn send_signal(&self, peer_id: PeerId, msg: &ServerMessage) {
        let Some(peer) = self.inner.peers.get(&peer_id) else {
            warn!("Attempted to send signal to disconnected peer {}", peer_id);
            return;
        };
        match codec::encode(msg) {
            Ok(json) => {
                if let Err(e) = peer.tx.send(Message::Text(json.into())) {
                    error!("Failed to send WS message to {}: {:?}", peer_id, e);
                }
            }
            Err(e) => error!("Failed to serialize signal message: {}", e),
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn deliver(&self, peer_id: PeerId, message: ServerMessage) {
        self.send_signal(peer_id, &message);
    }
}
