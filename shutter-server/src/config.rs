use shutter_core::IceServerConfig;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_MAX_PEERS: usize = 4;
const DEFAULT_HOST_JOIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Rendezvous server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Seats per room, host included.
    pub max_peers: usize,
    /// Base used to build shareable room links.
    pub public_url: String,
    /// Pushed to every peer on connect for the media transport.
    pub ice_servers: Vec<IceServerConfig>,
    /// Capacity of each room's command queue.
    pub room_queue: usize,
    /// How long a new room holds seat 0 for a host that has not joined yet.
    pub host_join_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_peers: DEFAULT_MAX_PEERS,
            public_url: "http://localhost:3000".to_owned(),
            ice_servers: vec![IceServerConfig {
                urls: vec!["stun:stun.l.google.com:19302".to_owned()],
                username: None,
                credential: None,
            }],
            room_queue: 100,
            host_join_timeout: DEFAULT_HOST_JOIN_TIMEOUT,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `SHUTTER_BIND`, `SHUTTER_MAX_PEERS`,
    /// `SHUTTER_PUBLIC_URL`, `SHUTTER_HOST_TIMEOUT_SECS` and
    /// `TURN_URL` / `TURN_USERNAME` / `TURN_CREDENTIAL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(addr) = env::var("SHUTTER_BIND").ok().and_then(|v| v.parse().ok()) {
            config.bind_addr = addr;
        }
        if let Some(max) = env::var("SHUTTER_MAX_PEERS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.max_peers = max;
        }
        if let Some(secs) = env::var("SHUTTER_HOST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.host_join_timeout = Duration::from_secs(secs);
        }
        if let Ok(url) = env::var("SHUTTER_PUBLIC_URL") {
            config.public_url = url;
        }
        if let Ok(turn_url) = env::var("TURN_URL") {
            config.ice_servers.push(IceServerConfig {
                urls: vec![turn_url],
                username: env::var("TURN_USERNAME").ok(),
                credential: env::var("TURN_CREDENTIAL").ok(),
            });
        }

        config
    }

    pub fn room_link(&self, room: &shutter_core::RoomId) -> String {
        format!("{}/join/{}", self.public_url.trim_end_matches('/'), room)
    }
}
