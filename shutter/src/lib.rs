//! Shared photo booth rooms: a rendezvous server and the peer-side session
//! that keeps every member's stickers, frame and room phase in step.

pub use shutter_core::model::{PeerId, PeerIdentity, RoomId};
pub use shutter_core::{codec, error, membership};

pub mod model {
    pub use shutter_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use shutter_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use shutter_client::*;
}
