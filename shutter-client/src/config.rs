use shutter_core::{PeerId, RoomId};
use std::env;

/// Where the rendezvous server lives.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// HTTP base of the rendezvous server, e.g. `http://localhost:3000`.
    pub server_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:3000".to_owned(),
        }
    }
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
        }
    }

    /// Defaults overridden by `SHUTTER_SERVER_URL`.
    pub fn from_env() -> Self {
        match env::var("SHUTTER_SERVER_URL") {
            Ok(url) => Self::new(url),
            Err(_) => Self::default(),
        }
    }

    fn base(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }

    pub fn rooms_url(&self) -> String {
        format!("{}/rooms", self.base())
    }

    pub fn ws_url(&self, peer_id: PeerId) -> String {
        let base = self.base();
        let base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            base.to_owned()
        };
        format!("{base}/ws/{peer_id}")
    }
}

/// Per-session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub room: RoomId,
    /// Buffer of the `subscribe()` broadcast. Slow subscribers lag past it.
    pub event_capacity: usize,
    /// Capacity of the session's command queue.
    pub command_queue: usize,
}

impl SessionConfig {
    pub fn new(room: RoomId) -> Self {
        Self {
            room,
            event_capacity: 256,
            command_queue: 32,
        }
    }
}
