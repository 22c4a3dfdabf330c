use crate::room::room_command::RoomCommand;
use crate::signaling::SignalingOutput;
use shutter_core::membership::{MembershipEvent, Roster};
use shutter_core::{PeerId, PeerIdentity, Recipient, RoomId, RoomMember, ServerMessage, unix_millis};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

/// One room's event loop. It is the only writer of the room's roster.
pub struct Room {
    id: RoomId,
    roster: Roster,
    command_rx: mpsc::Receiver<RoomCommand>,
    signaling: Arc<dyn SignalingOutput>,
    /// Seated peers whose socket has joined this room and not closed since.
    connected: HashSet<PeerId>,
    host_join_timeout: Option<Duration>,
}

impl Room {
    pub fn new(
        id: RoomId,
        roster: Roster,
        command_rx: mpsc::Receiver<RoomCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            id,
            roster,
            command_rx,
            signaling,
            connected: HashSet::new(),
            host_join_timeout: None,
        }
    }

    /// Release seat 0 if the host has not joined within `timeout` of `run`.
    pub fn with_host_join_timeout(mut self, timeout: Duration) -> Self {
        self.host_join_timeout = Some(timeout);
        self
    }

    pub async fn run(mut self) {
        info!("Room {} event loop started", self.id);
        let host_deadline = self.host_join_timeout.map(|t| Instant::now() + t);

        loop {
            let awaiting_host = host_deadline.is_some() && self.awaiting_host();

            tokio::select! {
                cmd = self.command_rx.recv() => {
                    let Some(cmd) = cmd else {
                        info!("Command channel closed. Shutting down room {}.", self.id);
                        break;
                    };
                    self.handle_command(cmd).await;
                }
                _ = sleep_until(host_deadline.unwrap_or_else(Instant::now)), if awaiting_host => {
                    let host = self.roster.host();
                    info!("Host {} never joined room {}. Releasing seat 0.", host, self.id);
                    self.leave(host).await;
                }
            }

            if self.roster.is_empty() {
                info!("Room {} is empty. Shutting down room.", self.id);
                break;
            }
        }

        info!("Room {} event loop finished", self.id);
    }

    /// The host still holds the seat it got at creation but never joined.
    fn awaiting_host(&self) -> bool {
        let host = self.roster.host();
        self.roster.contains(&host) && !self.connected.contains(&host)
    }

    async fn handle_command(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join { peer } => self.handle_join(peer).await,

            RoomCommand::Relay {
                from,
                to,
                handshake,
            } => {
                if !self.roster.contains(&from) {
                    warn!("Dropping handshake from {} who is not seated in {}", from, self.id);
                    return;
                }
                let message = ServerMessage::Signal { from, handshake };
                match to {
                    Recipient::Peer(target) if self.roster.contains(&target) => {
                        self.signaling.deliver(target, message).await;
                    }
                    Recipient::Peer(target) => {
                        warn!("Handshake from {} addressed to absent peer {}", from, target);
                    }
                    Recipient::Room => self.deliver_to_others(from, message).await,
                }
            }

            RoomCommand::Broadcast { from, payload } => {
                if !self.roster.contains(&from) {
                    warn!("Dropping broadcast from {} who is not seated in {}", from, self.id);
                    return;
                }
                debug!("Relaying {:?} from {} in {}", payload, from, self.id);
                self.deliver_to_others(from, ServerMessage::Broadcast { from, payload })
                    .await;
            }

            RoomCommand::Disconnect { peer_id } => {
                let was_connected = self.connected.contains(&peer_id);
                self.leave(peer_id).await;
                if was_connected && self.connected.is_empty() {
                    self.release_unreachable();
                }
            }
        }
    }

    async fn leave(&mut self, peer_id: PeerId) {
        self.connected.remove(&peer_id);
        let Some(MembershipEvent::MemberLeft(member)) = self.roster.observe_leave(&peer_id) else {
            return;
        };
        info!("{} left room {} (freed {})", member.identity, self.id, member.position);
        self.deliver_to_others(peer_id, ServerMessage::PeerLeft { member })
            .await;
    }

    /// Drops seats held by peers that never joined over a socket. Only
    /// called once nobody connected is left to tell.
    fn release_unreachable(&mut self) {
        let stale: Vec<PeerId> = self.roster.iter().map(|m| m.identity.id).collect();
        for peer in stale {
            if let Some(MembershipEvent::MemberLeft(member)) = self.roster.observe_leave(&peer) {
                info!("Releasing {} in room {}: never connected", member.identity, self.id);
            }
        }
    }

    async fn handle_join(&mut self, peer: PeerIdentity) {
        let peer_id = peer.id;
        match self.roster.observe_join(peer, unix_millis()) {
            Ok(Some(MembershipEvent::MemberJoined(member))) => {
                info!("{} joined room {} at {}", member.identity, self.id, member.position);
                self.connected.insert(peer_id);
                self.welcome(member.clone()).await;
                self.deliver_to_others(peer_id, ServerMessage::PeerJoined { member })
                    .await;
            }
            Ok(_) => {
                let Some(member) = self.roster.get(&peer_id).cloned() else {
                    return;
                };
                // Broadcasts sent while its old socket was dying are lost, so
                // the others hear about it again and the host resyncs it.
                debug!("{} re-joined room {}; resending welcome", member.identity, self.id);
                self.connected.insert(peer_id);
                self.welcome(member.clone()).await;
                self.deliver_to_others(peer_id, ServerMessage::PeerJoined { member })
                    .await;
            }
            Err(full) => {
                info!("Rejecting {} from room {}: {}", peer_id, self.id, full);
                self.signaling
                    .deliver(
                        peer_id,
                        ServerMessage::RoomFull {
                            room: self.id,
                            capacity: full.capacity,
                        },
                    )
                    .await;
            }
        }
    }

    async fn welcome(&self, member: RoomMember) {
        let message = ServerMessage::Welcome {
            peer_id: member.identity.id,
            host: self.roster.host(),
            capacity: self.roster.capacity(),
            roster: self.roster.members(),
            member: member.clone(),
        };
        self.signaling.deliver(member.identity.id, message).await;
    }

    async fn deliver_to_others(&self, sender: PeerId, message: ServerMessage) {
        let targets: Vec<PeerId> = self
            .roster
            .iter()
            .map(|m| m.identity.id)
            .filter(|id| *id != sender)
            .collect();

        for target in targets {
            self.signaling.deliver(target, message.clone()).await;
        }
    }
}
