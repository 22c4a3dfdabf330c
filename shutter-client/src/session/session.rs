use crate::channel::SignalingChannel;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::event::{SessionEvent, UserNotice};
use crate::lifecycle::{LifecycleBus, LocalIntent, RemoteEvent};
use crate::session::command::{Reply, SessionCommand};
use crate::session::{SessionHandle, SessionSnapshot};
use crate::signaling::{ConnectionState, Outbox, SignalingClient, SignalingEvent};
use crate::state::{FrameToggle, Reconcile, Replicated, SessionStore};
use shutter_core::{
    CanvasPoint, FrameKind, MembershipError, MembershipEvent, PeerId, PeerIdentity,
    PhaseTransition, RoomMember, RoomPayload, RoomStateMachine, Roster, ServerMessage, Sticker,
    StickerKind,
};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, error, info, warn};

/// One peer's view of one room. Sole writer of the local roster, phase and
/// replicated state; everything reaches it through its two queues.
pub struct RoomSession {
    config: SessionConfig,
    identity: PeerIdentity,
    signaling: SignalingClient,
    signaling_rx: mpsc::UnboundedReceiver<SignalingEvent>,
    commands: mpsc::Receiver<SessionCommand>,
    /// Set once the server has seated us.
    machine: Option<RoomStateMachine>,
    store: SessionStore,
    bus: LifecycleBus,
    events: broadcast::Sender<SessionEvent>,
    snapshot: watch::Sender<SessionSnapshot>,
}

impl RoomSession {
    /// Connects, asks to join `config.room` and spawns the session loop.
    pub async fn start(
        config: SessionConfig,
        channel: Arc<dyn SignalingChannel>,
        identity: PeerIdentity,
    ) -> Result<SessionHandle, SessionError> {
        let (signaling_tx, signaling_rx) = mpsc::unbounded_channel();
        let mut signaling = SignalingClient::new(identity.id, channel, signaling_tx);
        signaling.connect().await?;
        signaling.join(config.room, identity.nickname.clone())?;
        info!("{} asked to join room {}", identity, config.room);

        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let (command_tx, commands) = mpsc::channel(config.command_queue.max(1));
        let (snapshot, snapshot_rx) = watch::channel(SessionSnapshot {
            room: config.room,
            local: identity.clone(),
            connection: signaling.state(),
            host: None,
            capacity: 0,
            phase: Default::default(),
            roster: Vec::new(),
            stickers: Vec::new(),
            frame: FrameKind::default(),
        });

        let session = Self {
            config,
            identity,
            signaling,
            signaling_rx,
            commands,
            machine: None,
            store: SessionStore::default(),
            bus: LifecycleBus::new(events.clone()),
            events: events.clone(),
            snapshot,
        };
        let task = tokio::spawn(session.run());

        Ok(SessionHandle::new(command_tx, snapshot_rx, events, task))
    }

    async fn run(mut self) {
        debug!("Session loop for {} started", self.identity);

        loop {
            tokio::select! {
                cmd = self.commands.recv() => match cmd {
                    Some(SessionCommand::Leave { reply }) => {
                        self.shut_down();
                        let _ = reply.send(());
                        break;
                    }
                    Some(cmd) => self.handle_command(cmd).await,
                    None => {
                        self.shut_down();
                        break;
                    }
                },
                Some(event) = self.signaling_rx.recv() => {
                    if let Err(fatal) = self.handle_signaling(event) {
                        error!("Roster diverged from the server, stopping session: {}", fatal);
                        self.emit(SessionEvent::Fatal(fatal));
                        self.shut_down();
                        break;
                    }
                }
            }
            self.publish_snapshot();
        }

        debug!("Session loop for {} finished", self.identity);
    }

    fn shut_down(&mut self) {
        info!("{} leaving room {}", self.identity, self.config.room);
        self.signaling.disconnect();
        self.publish_snapshot();
    }

    async fn handle_command(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::AddSticker { kind, at, reply } => {
                let result = self.add_sticker(kind, at);
                self.reply(reply, result);
            }
            SessionCommand::ToggleFrame { reply } => {
                let result = self.toggle_frame();
                self.reply(reply, result);
            }
            SessionCommand::Lifecycle { intent, reply } => {
                let result = self.publish_lifecycle(intent);
                self.reply(reply, result);
            }
            SessionCommand::SendHandshake {
                handshake,
                to,
                reply,
            } => {
                let result = self.signaling.send(handshake, to).map_err(Into::into);
                self.reply(reply, result);
            }
            SessionCommand::Reconnect { reply } => {
                let result = self.reconnect().await;
                self.reply(reply, result);
            }
            SessionCommand::Leave { reply } => {
                let _ = reply.send(());
            }
        }
    }

    /// Readers see the change before the caller hears back.
    fn reply<T>(&self, reply: Reply<T>, result: Result<T, SessionError>) {
        self.publish_snapshot();
        let _ = reply.send(result);
    }

    fn add_sticker(&mut self, kind: StickerKind, at: CanvasPoint) -> Result<Vec<Sticker>, SessionError> {
        self.require_seat()?;
        let sticker = Sticker::new(kind, at, self.identity.id);
        let stickers = self.store.stickers.apply_local(sticker);
        self.emit(SessionEvent::StickersChanged(stickers.clone()));

        self.signaling.broadcast(self.store.stickers.payload())?;
        Ok(stickers)
    }

    fn toggle_frame(&mut self) -> Result<FrameKind, SessionError> {
        self.require_host()?;
        let frame = self.store.frame.apply_local(FrameToggle);
        self.emit(SessionEvent::FrameChanged(frame));

        self.signaling.broadcast(self.store.frame.payload())?;
        Ok(frame)
    }

    fn publish_lifecycle(&mut self, intent: LocalIntent) -> Result<PhaseTransition, SessionError> {
        self.require_host()?;
        let machine = self.machine.as_mut().ok_or(SessionError::NotSeated)?;
        Ok(self.bus.publish(intent, machine, &self.signaling)?)
    }

    async fn reconnect(&mut self) -> Result<(), SessionError> {
        if self.signaling.is_connected() {
            return Ok(());
        }
        self.signaling.connect().await?;
        self.signaling
            .join(self.config.room, self.identity.nickname.clone())?;
        Ok(())
    }

    fn require_seat(&self) -> Result<&RoomStateMachine, SessionError> {
        self.machine
            .as_ref()
            .filter(|m| m.roster().contains(&self.identity.id))
            .ok_or(SessionError::NotSeated)
    }

    fn require_host(&self) -> Result<(), SessionError> {
        if self.require_seat()?.is_host(&self.identity.id) {
            Ok(())
        } else {
            Err(SessionError::NotHost)
        }
    }

    fn handle_signaling(&mut self, event: SignalingEvent) -> Result<(), MembershipError> {
        match event {
            SignalingEvent::Connected => {
                self.emit(SessionEvent::Connection(ConnectionState::Connected));
            }
            SignalingEvent::Disconnected { reason } => {
                self.emit(SessionEvent::Connection(ConnectionState::Disconnected));
                if let Some(machine) = self.machine.as_mut() {
                    let gone = machine.retain_only(&self.identity.id);
                    self.emit_membership(gone);
                }
                if let Some(reason) = reason {
                    warn!("{} lost the room connection: {}", self.identity, reason);
                    self.emit(SessionEvent::Notice(UserNotice::ConnectionLost));
                }
            }
            SignalingEvent::DecodeFailed(e) => {
                debug!("Ignoring undecodable frame: {}", e);
            }
            SignalingEvent::Message(message) => self.handle_message(message)?,
        }
        Ok(())
    }

    fn handle_message(&mut self, message: ServerMessage) -> Result<(), MembershipError> {
        match message {
            ServerMessage::IceConfig { ice_servers } => {
                self.emit(SessionEvent::IceServers(ice_servers));
            }

            ServerMessage::Welcome {
                peer_id,
                host,
                capacity,
                member,
                roster,
            } => {
                if peer_id != self.identity.id {
                    warn!("Welcome addressed to {} reached {}", peer_id, self.identity.id);
                    return Ok(());
                }
                info!("{} seated at {} in room {}", self.identity, member.position, self.config.room);
                let machine = self
                    .machine
                    .get_or_insert_with(|| RoomStateMachine::new(Roster::new(host, capacity)));
                let changes = machine.restore(host, capacity, roster)?;
                self.emit_membership(changes);
            }

            ServerMessage::RoomFull { capacity, .. } => {
                info!("Room {} is full", self.config.room);
                self.emit(SessionEvent::Notice(UserNotice::RoomFull { capacity }));
            }

            ServerMessage::UnknownRoom { room } => {
                info!("Room {} does not exist", room);
                self.emit(SessionEvent::Notice(UserNotice::UnknownRoom));
            }

            ServerMessage::PeerJoined { member } => {
                let Some(machine) = self.machine.as_mut() else {
                    debug!("PeerJoined before we were seated; ignoring");
                    return Ok(());
                };
                if let Some(event) = machine.admit(member.clone())? {
                    self.emit(SessionEvent::Membership(event));
                }
                // A repeated announcement means the peer re-joined and may have
                // missed broadcasts, so it is caught up either way.
                self.catch_up(&member);
            }

            ServerMessage::PeerLeft { member } => {
                let Some(machine) = self.machine.as_mut() else {
                    return Ok(());
                };
                if let Some(event) = machine.observe_leave(&member.identity.id) {
                    self.emit(SessionEvent::Membership(event));
                }
            }

            ServerMessage::Signal { from, handshake } => {
                self.emit(SessionEvent::Handshake { from, handshake });
            }

            ServerMessage::Broadcast { from, payload } => self.apply_remote(from, payload),
        }
        Ok(())
    }

    fn apply_remote(&mut self, from: PeerId, payload: RoomPayload) {
        if from == self.identity.id {
            warn!("Dropping our own broadcast echoed back by the server");
            return;
        }
        match payload {
            RoomPayload::Lifecycle(event) => {
                let Some(machine) = self.machine.as_mut() else {
                    debug!("Lifecycle {:?} before we were seated; ignoring", event);
                    return;
                };
                self.bus.deliver(RemoteEvent::received(event), machine);
            }
            RoomPayload::Stickers(stickers) => {
                if self.store.stickers.apply_remote(stickers) == Reconcile::Applied {
                    let current = self.store.stickers.current_value().clone();
                    self.emit(SessionEvent::StickersChanged(current));
                }
            }
            RoomPayload::Frame(frame) => {
                if self.store.frame.apply_remote(frame) == Reconcile::Applied {
                    self.emit(SessionEvent::FrameChanged(frame));
                }
            }
        }
    }

    /// The host re-sends replicated state when a guest arrives, so the guest
    /// converges without a request/response round.
    fn catch_up(&self, newcomer: &RoomMember) {
        let Some(machine) = self.machine.as_ref() else {
            return;
        };
        if !machine.is_host(&self.identity.id) || newcomer.identity.id == self.identity.id {
            return;
        }

        let mut payloads = vec![self.store.stickers.payload(), self.store.frame.payload()];
        payloads.extend(machine.phase().entered_by().map(RoomPayload::Lifecycle));

        for payload in payloads {
            if let Err(e) = self.signaling.broadcast(payload) {
                warn!("Could not bring {} up to date: {}", newcomer.identity, e);
                return;
            }
        }
    }

    fn emit_membership(&self, changes: Vec<MembershipEvent>) {
        for change in changes {
            self.emit(SessionEvent::Membership(change));
        }
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn publish_snapshot(&self) {
        let (host, capacity, phase, roster) = match &self.machine {
            Some(machine) => (
                Some(machine.roster().host()),
                machine.roster().capacity(),
                machine.phase(),
                machine.roster().members(),
            ),
            None => (None, 0, Default::default(), Vec::new()),
        };

        self.snapshot.send_replace(SessionSnapshot {
            room: self.config.room,
            local: self.identity.clone(),
            connection: self.signaling.state(),
            host,
            capacity,
            phase,
            roster,
            stickers: self.store.stickers.current_value().clone(),
            frame: *self.store.frame.current_value(),
        });
    }
}
