use crate::channel::{ChannelSink, ChannelStream, SignalingChannel};
use crate::config::ClientConfig;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt, future};
use shutter_core::{ConnectionError, PeerId};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, info};

/// [`SignalingChannel`] over a WebSocket to `GET /ws/{peer_id}`.
#[derive(Debug, Clone)]
pub struct WebSocketChannel {
    config: ClientConfig,
}

impl WebSocketChannel {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SignalingChannel for WebSocketChannel {
    async fn open(&self, peer_id: PeerId) -> Result<(ChannelSink, ChannelStream), ConnectionError> {
        let url = self.config.ws_url(peer_id);
        debug!("Connecting to {}", url);

        let (socket, _) = connect_async(url.as_str())
            .await
            .map_err(|e| ConnectionError::Unreachable(e.to_string()))?;
        info!("WebSocket open: {}", url);

        let (write, read) = socket.split();

        let sink = write
            .with(|text: String| future::ready(Ok::<_, WsError>(Message::text(text))))
            .sink_map_err(|e| ConnectionError::Transport(e.to_string()));

        let stream = read.filter_map(|frame| {
            future::ready(match frame {
                Ok(Message::Text(text)) => Some(Ok(text.as_str().to_owned())),
                Ok(_) => None,
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => {
                    Some(Err(ConnectionError::Closed))
                }
                Err(e) => Some(Err(ConnectionError::Transport(e.to_string()))),
            })
        });

        Ok((Box::pin(sink), Box::pin(stream)))
    }
}
