use crate::error::SessionError;
use crate::event::SessionEvent;
use crate::lifecycle::LocalIntent;
use crate::session::SessionSnapshot;
use crate::session::command::SessionCommand;
use shutter_core::{
    CanvasPoint, FrameKind, HandshakeMessage, PhaseTransition, Position, Recipient, RoomMember,
    RoomPhase, Sticker, StickerKind,
};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// Cheap, cloneable access to a running [`RoomSession`](crate::RoomSession).
///
/// Reads come from the latest snapshot and never wait on the session loop.
/// Mutations are queued and answered once the loop has applied them.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    snapshot: watch::Receiver<SessionSnapshot>,
    events: broadcast::Sender<SessionEvent>,
    task: Arc<JoinHandle<()>>,
}

impl SessionHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<SessionCommand>,
        snapshot: watch::Receiver<SessionSnapshot>,
        events: broadcast::Sender<SessionEvent>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            commands,
            snapshot,
            events,
            task: Arc::new(task),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Follow snapshots as they change.
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn current_stickers(&self) -> Vec<Sticker> {
        self.snapshot.borrow().stickers.clone()
    }

    pub fn current_frame(&self) -> FrameKind {
        self.snapshot.borrow().frame
    }

    pub fn roster(&self) -> Vec<RoomMember> {
        self.snapshot.borrow().roster.clone()
    }

    /// Our own seat, or `None` before the server has seated us.
    pub fn local_member(&self) -> Option<RoomMember> {
        self.snapshot.borrow().local_member().cloned()
    }

    pub fn member_at(&self, position: Position) -> Option<RoomMember> {
        self.snapshot.borrow().member_at(position).cloned()
    }

    pub fn phase(&self) -> RoomPhase {
        self.snapshot.borrow().phase
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Appends a sticker and broadcasts the whole collection. The sticker
    /// stays applied locally even when the broadcast fails.
    pub async fn add_sticker(
        &self,
        kind: StickerKind,
        at: CanvasPoint,
    ) -> Result<Vec<Sticker>, SessionError> {
        self.request(|reply| SessionCommand::AddSticker { kind, at, reply })
            .await
    }

    /// Host only.
    pub async fn toggle_frame(&self) -> Result<FrameKind, SessionError> {
        self.request(|reply| SessionCommand::ToggleFrame { reply })
            .await
    }

    /// Host only.
    pub async fn start_countdown(&self) -> Result<PhaseTransition, SessionError> {
        self.lifecycle(LocalIntent::start_countdown()).await
    }

    /// Host only.
    pub async fn navigate_to_photo_room(&self) -> Result<PhaseTransition, SessionError> {
        self.lifecycle(LocalIntent::navigate_to_photo_room()).await
    }

    /// Host only.
    pub async fn navigate_to_share_room(&self) -> Result<PhaseTransition, SessionError> {
        self.lifecycle(LocalIntent::navigate_to_share_room()).await
    }

    pub async fn send_handshake(
        &self,
        handshake: HandshakeMessage,
        to: Recipient,
    ) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::SendHandshake {
            handshake,
            to,
            reply,
        })
        .await
    }

    /// Reconnects and re-joins after a lost connection. A no-op while connected.
    pub async fn reconnect(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Reconnect { reply })
            .await
    }

    /// Disconnects and stops the session. Safe to call more than once.
    pub async fn leave(&self) {
        let (reply, rx) = oneshot::channel();
        if self
            .commands
            .send(SessionCommand::Leave { reply })
            .await
            .is_ok()
        {
            let _ = rx.await;
        }
    }

    async fn lifecycle(&self, intent: LocalIntent) -> Result<PhaseTransition, SessionError> {
        self.request(|reply| SessionCommand::Lifecycle { intent, reply })
            .await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<Result<T, SessionError>>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)?
    }
}
