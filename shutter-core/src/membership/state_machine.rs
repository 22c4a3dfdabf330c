use crate::error::{MembershipError, RoomFullError};
use crate::membership::roster::{MembershipEvent, Roster};
use crate::model::{LifecycleEvent, PeerId, PeerIdentity, RoomMember, RoomPhase};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTransition {
    Applied { from: RoomPhase, to: RoomPhase },
    /// The room was already in the event's target phase.
    AlreadyInPhase(RoomPhase),
}

impl PhaseTransition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Roster plus the room-wide phase, as seen by one process.
#[derive(Debug, Clone)]
pub struct RoomStateMachine {
    roster: Roster,
    phase: RoomPhase,
}

impl RoomStateMachine {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            phase: RoomPhase::Waiting,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub fn is_host(&self, peer: &PeerId) -> bool {
        self.roster.host() == *peer
    }

    pub fn observe_join(
        &mut self,
        identity: PeerIdentity,
        joined_at: u64,
    ) -> Result<Option<MembershipEvent>, RoomFullError> {
        self.roster.observe_join(identity, joined_at)
    }

    pub fn observe_leave(&mut self, peer: &PeerId) -> Option<MembershipEvent> {
        self.roster.observe_leave(peer)
    }

    pub fn admit(&mut self, member: RoomMember) -> Result<Option<MembershipEvent>, MembershipError> {
        self.roster.admit(member)
    }

    pub fn restore(
        &mut self,
        host: PeerId,
        capacity: usize,
        members: Vec<RoomMember>,
    ) -> Result<Vec<MembershipEvent>, MembershipError> {
        self.roster.restore(host, capacity, members)
    }

    pub fn retain_only(&mut self, keep: &PeerId) -> Vec<MembershipEvent> {
        self.roster.retain_only(keep)
    }

    /// Moves the room to the event's target phase. Authorization is the
    /// caller's concern; this only records the transition.
    pub fn apply_lifecycle(&mut self, event: LifecycleEvent) -> PhaseTransition {
        let target = event.target();
        if self.phase == target {
            info!("Lifecycle {:?} ignored: room already in {:?}", event, target);
            return PhaseTransition::AlreadyInPhase(target);
        }

        let from = std::mem::replace(&mut self.phase, target);
        debug!("Room phase {:?} -> {:?}", from, target);
        PhaseTransition::Applied { from, to: target }
    }
}
