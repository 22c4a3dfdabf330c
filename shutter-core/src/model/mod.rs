mod frame;
mod handshake;
mod lifecycle;
mod member;
mod peer;
mod room;
mod signaling;
mod sticker;

pub use frame::FrameKind;
pub use handshake::{HandshakeMessage, Recipient, SdpKind};
pub use lifecycle::{LifecycleEvent, LifecycleNotification, Origin, RoomPhase};
pub use member::{Position, RoomMember, unix_millis};
pub use peer::{PeerId, PeerIdentity};
pub use room::{CreateRoomRequest, RoomId, RoomInvite};
pub use signaling::{ClientMessage, IceServerConfig, RoomPayload, ServerMessage};
pub use sticker::{CanvasPoint, Sticker, StickerId, StickerKind};
