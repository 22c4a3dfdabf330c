//! Shared model, wire codec and room membership rules for Shutter.

pub mod codec;
pub mod error;
pub mod membership;
pub mod model;

pub use error::{
    ConnectionError, DecodeError, MembershipError, RoomCreationError, RoomFullError, SendError,
};
pub use membership::{MembershipEvent, PhaseTransition, Roster, RoomStateMachine};
pub use model::*;
