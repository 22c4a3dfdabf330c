mod roster;
mod state_machine;

pub use roster::{MAX_CAPACITY, MembershipEvent, Roster, RosterState};
pub use state_machine::{PhaseTransition, RoomStateMachine};
