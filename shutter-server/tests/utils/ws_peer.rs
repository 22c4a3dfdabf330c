use anyhow::{Context, Result, bail, ensure};
use futures::{SinkExt, StreamExt};
use shutter_core::{
    ClientMessage, CreateRoomRequest, PeerIdentity, RoomId, RoomInvite, ServerMessage, codec,
};
use shutter_server::{ServerConfig, serve_on};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// Timeout for a single expected server frame.
pub const SIGNAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Start a real server on an ephemeral local port.
pub async fn spawn_server(config: ServerConfig) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = serve_on(listener, config).await {
            tracing::error!("[TestServer] stopped: {e:#}");
        }
    });
    Ok(addr)
}

/// `POST /rooms` as a freshly generated host.
pub async fn create_room(addr: SocketAddr, nickname: &str) -> Result<(PeerIdentity, RoomInvite)> {
    let host = PeerIdentity::new(nickname);
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/rooms"))
        .json(&CreateRoomRequest { host: host.clone() })
        .send()
        .await
        .context("create room request failed")?;

    ensure!(
        response.status() == reqwest::StatusCode::CREATED,
        "unexpected status {}",
        response.status()
    );
    let invite = response.json::<RoomInvite>().await?;
    Ok((host, invite))
}

/// A peer speaking the signaling protocol over a real WebSocket.
pub struct WsPeer {
    pub identity: PeerIdentity,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsPeer {
    /// Connects and consumes the ICE configuration pushed on connect.
    pub async fn connect(addr: SocketAddr, identity: PeerIdentity) -> Result<Self> {
        let url = format!("ws://{addr}/ws/{}", identity.id);
        let (stream, _) = connect_async(url).await.context("ws connect failed")?;
        let mut peer = Self { identity, stream };

        match peer.recv().await? {
            ServerMessage::IceConfig { .. } => Ok(peer),
            other => bail!("expected IceConfig first, got {other:?}"),
        }
    }

    pub async fn send(&mut self, message: &ClientMessage) -> Result<()> {
        let json = codec::encode(message)?;
        self.stream.send(Message::Text(json.into())).await?;
        Ok(())
    }

    pub async fn join(&mut self, room: RoomId) -> Result<ServerMessage> {
        let nickname = self.identity.nickname.clone();
        self.send(&ClientMessage::Join { room, nickname }).await?;
        self.recv().await
    }

    pub async fn recv(&mut self) -> Result<ServerMessage> {
        match self.recv_within(SIGNAL_TIMEOUT).await? {
            Some(message) => Ok(message),
            None => bail!("timed out waiting for a server frame"),
        }
    }

    /// `Ok(None)` if nothing arrives within `window`.
    pub async fn recv_within(&mut self, window: Duration) -> Result<Option<ServerMessage>> {
        let deadline = tokio::time::Instant::now() + window;
        loop {
            let frame = match tokio::time::timeout_at(deadline, self.stream.next()).await {
                Err(_) => return Ok(None),
                Ok(None) => bail!("socket closed"),
                Ok(Some(frame)) => frame?,
            };
            if let Message::Text(text) = frame {
                return Ok(Some(codec::decode(text.as_str())?));
            }
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
