use crate::room::{Room, RoomCommand};
use crate::signaling::SignalingOutput;
use dashmap::DashMap;
use shutter_core::membership::Roster;
use shutter_core::{PeerIdentity, RoomId, unix_millis};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Registry of live rooms. Each room runs as its own task and is dropped
/// from the registry once its event loop ends.
#[derive(Clone)]
pub struct RoomManager {
    rooms: Arc<DashMap<RoomId, mpsc::Sender<RoomCommand>>>,
    signaling: Arc<dyn SignalingOutput>,
    capacity: usize,
    queue: usize,
    host_join_timeout: Option<Duration>,
}

impl RoomManager {
    pub fn new(signaling: Arc<dyn SignalingOutput>, capacity: usize, queue: usize) -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
            signaling,
            capacity,
            queue: queue.max(1),
            host_join_timeout: None,
        }
    }

    /// Rooms release seat 0 if their host has not joined within `timeout`.
    pub fn with_host_join_timeout(mut self, timeout: Duration) -> Self {
        self.host_join_timeout = Some(timeout);
        self
    }

    /// Open a room with `host` already seated at position 0.
    pub fn create_room(&self, host: PeerIdentity) -> RoomId {
        let room_id = RoomId::new();
        info!("Creating new room {} for host {}", room_id, host);

        let (tx, rx) = mpsc::channel(self.queue);
        let roster = Roster::with_host(host, self.capacity, unix_millis());
        let mut room = Room::new(room_id, roster, rx, self.signaling.clone());
        if let Some(timeout) = self.host_join_timeout {
            room = room.with_host_join_timeout(timeout);
        }

        self.rooms.insert(room_id, tx);

        let rooms = self.rooms.clone();
        tokio::spawn(async move {
            room.run().await;
            rooms.remove(&room_id);
            info!("Room {} removed", room_id);
        });

        room_id
    }

    pub fn room_sender(&self, room_id: &RoomId) -> Option<mpsc::Sender<RoomCommand>> {
        self.rooms
            .get(room_id)
            .map(|sender| sender.clone())
            .filter(|sender| !sender.is_closed())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
