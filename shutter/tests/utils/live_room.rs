use anyhow::{Context, Result};
use shutter::client::{
    ClientConfig, HttpRoomCreator, RoomCreator, RoomSession, SessionConfig, SessionEvent,
    SessionHandle, SessionSnapshot, WebSocketChannel,
};
use shutter::model::{PeerIdentity, RoomInvite};
use shutter::server::{ServerConfig, serve_on};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::Level;

/// Upper bound on anything a test waits for.
pub const CONVERGE_TIMEOUT: Duration = Duration::from_secs(10);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A rendezvous server on an ephemeral local port.
pub struct LiveServer {
    pub addr: SocketAddr,
}

impl LiveServer {
    pub async fn start(max_peers: usize) -> Result<Self> {
        let config = ServerConfig {
            max_peers,
            ice_servers: Vec::new(),
            ..ServerConfig::default()
        };
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = serve_on(listener, config).await {
                tracing::error!("[LiveServer] stopped: {e:#}");
            }
        });
        Ok(Self { addr })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(format!("http://{}", self.addr))
    }

    /// Creates a room over HTTP and starts the host's session in it.
    pub async fn host_room(&self, nickname: &str) -> Result<(LivePeer, RoomInvite)> {
        let identity = PeerIdentity::new(nickname);
        let invite = HttpRoomCreator::new(self.client_config())
            .create_room(identity.clone())
            .await?;
        let host = self.join(identity, &invite).await?;
        Ok((host, invite))
    }

    pub async fn join(&self, identity: PeerIdentity, invite: &RoomInvite) -> Result<LivePeer> {
        let channel = Arc::new(WebSocketChannel::new(self.client_config()));
        let handle =
            RoomSession::start(SessionConfig::new(invite.room), channel, identity.clone()).await?;
        let events = handle.subscribe();
        Ok(LivePeer {
            identity,
            handle,
            events,
        })
    }
}

/// One participant, talking to the server over a real WebSocket.
pub struct LivePeer {
    pub identity: PeerIdentity,
    pub handle: SessionHandle,
    pub events: broadcast::Receiver<SessionEvent>,
}

impl LivePeer {
    pub async fn wait_for(
        &self,
        ready: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Result<SessionSnapshot> {
        let mut watch = self.handle.watch();
        let snapshot = tokio::time::timeout(CONVERGE_TIMEOUT, watch.wait_for(ready))
            .await
            .with_context(|| format!("{} never reached the expected state", self.identity))??
            .clone();
        Ok(snapshot)
    }

    /// Skips events until one matches.
    pub async fn wait_for_event(
        &mut self,
        mut wanted: impl FnMut(&SessionEvent) -> bool,
    ) -> Result<SessionEvent> {
        tokio::time::timeout(CONVERGE_TIMEOUT, async {
            loop {
                match self.events.recv().await {
                    Ok(event) if wanted(&event) => return Ok(event),
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => {
                        anyhow::bail!("event stream closed")
                    }
                }
            }
        })
        .await
        .with_context(|| format!("{} never saw the expected event", self.identity))?
    }
}
