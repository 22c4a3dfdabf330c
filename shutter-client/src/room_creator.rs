use crate::config::ClientConfig;
use async_trait::async_trait;
use shutter_core::{CreateRoomRequest, PeerIdentity, RoomCreationError, RoomInvite};
use tracing::{info, warn};

/// Opens a new room with the caller as host.
#[async_trait]
pub trait RoomCreator: Send + Sync {
    async fn create_room(&self, host: PeerIdentity) -> Result<RoomInvite, RoomCreationError>;
}

/// [`RoomCreator`] backed by the rendezvous server's `POST /rooms`.
#[derive(Debug, Clone)]
pub struct HttpRoomCreator {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpRoomCreator {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl RoomCreator for HttpRoomCreator {
    async fn create_room(&self, host: PeerIdentity) -> Result<RoomInvite, RoomCreationError> {
        let response = self
            .http
            .post(self.config.rooms_url())
            .json(&CreateRoomRequest { host })
            .send()
            .await
            .map_err(|e| RoomCreationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Create room rejected: {}", status);
            return Err(RoomCreationError::Rejected {
                status: status.as_u16(),
            });
        }

        let invite = response
            .json::<RoomInvite>()
            .await
            .map_err(|e| RoomCreationError::InvalidResponse(e.to_string()))?;
        info!("Created room {}", invite.room);
        Ok(invite)
    }
}
