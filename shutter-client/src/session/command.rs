use crate::error::SessionError;
use crate::lifecycle::LocalIntent;
use shutter_core::{
    CanvasPoint, FrameKind, HandshakeMessage, PhaseTransition, Recipient, Sticker, StickerKind,
};
use tokio::sync::oneshot;

pub(crate) type Reply<T> = oneshot::Sender<Result<T, SessionError>>;

/// Mutations queued onto the session loop.
#[derive(Debug)]
pub(crate) enum SessionCommand {
    AddSticker {
        kind: StickerKind,
        at: CanvasPoint,
        reply: Reply<Vec<Sticker>>,
    },
    ToggleFrame {
        reply: Reply<FrameKind>,
    },
    Lifecycle {
        intent: LocalIntent,
        reply: Reply<PhaseTransition>,
    },
    SendHandshake {
        handshake: HandshakeMessage,
        to: Recipient,
        reply: Reply<()>,
    },
    Reconnect {
        reply: Reply<()>,
    },
    Leave {
        reply: oneshot::Sender<()>,
    },
}
