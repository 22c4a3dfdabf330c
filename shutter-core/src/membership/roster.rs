use crate::error::{MembershipError, RoomFullError};
use crate::model::{PeerId, PeerIdentity, Position, RoomMember};
use std::collections::BTreeMap;

/// Largest room a [`Position`] can address.
pub const MAX_CAPACITY: usize = u8::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipEvent {
    MemberJoined(RoomMember),
    MemberLeft(RoomMember),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterState {
    Empty,
    Waiting,
    Full,
}

/// Seat assignment for one room.
///
/// Position 0 is reserved for the host. Guests take the lowest free seat in
/// `1..capacity`. A seated peer keeps its position until it leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    host: PeerId,
    capacity: usize,
    seats: BTreeMap<Position, RoomMember>,
}

impl Roster {
    pub fn new(host: PeerId, capacity: usize) -> Self {
        Self {
            host,
            capacity: capacity.clamp(1, MAX_CAPACITY),
            seats: BTreeMap::new(),
        }
    }

    /// A roster created together with its room: the host is already seated.
    pub fn with_host(host: PeerIdentity, capacity: usize, joined_at: u64) -> Self {
        let mut roster = Self::new(host.id, capacity);
        roster.seats.insert(
            Position::HOST,
            RoomMember {
                identity: host,
                position: Position::HOST,
                joined_at,
            },
        );
        roster
    }

    pub fn host(&self) -> PeerId {
        self.host
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn state(&self) -> RosterState {
        match self.seats.len() {
            0 => RosterState::Empty,
            n if n >= self.capacity => RosterState::Full,
            _ => RosterState::Waiting,
        }
    }

    /// Members ordered by position.
    pub fn iter(&self) -> impl Iterator<Item = &RoomMember> {
        self.seats.values()
    }

    pub fn members(&self) -> Vec<RoomMember> {
        self.seats.values().cloned().collect()
    }

    pub fn get(&self, peer: &PeerId) -> Option<&RoomMember> {
        self.seats.values().find(|m| m.identity.id == *peer)
    }

    pub fn at(&self, position: Position) -> Option<&RoomMember> {
        self.seats.get(&position)
    }

    pub fn contains(&self, peer: &PeerId) -> bool {
        self.get(peer).is_some()
    }

    /// Seats a peer. Joining twice is a no-op that returns `Ok(None)`.
    pub fn observe_join(
        &mut self,
        identity: PeerIdentity,
        joined_at: u64,
    ) -> Result<Option<MembershipEvent>, RoomFullError> {
        if self.contains(&identity.id) {
            return Ok(None);
        }

        let position = self.free_seat_for(&identity.id).ok_or(RoomFullError {
            capacity: self.capacity,
        })?;

        let member = RoomMember {
            identity,
            position,
            joined_at,
        };
        self.seats.insert(position, member.clone());
        debug_assert!(self.invariants_hold());

        Ok(Some(MembershipEvent::MemberJoined(member)))
    }

    /// Releases a peer's seat. Leaving an absent peer is a no-op.
    pub fn observe_leave(&mut self, peer: &PeerId) -> Option<MembershipEvent> {
        let position = self.get(peer)?.position;
        let member = self.seats.remove(&position)?;
        debug_assert!(self.invariants_hold());
        Some(MembershipEvent::MemberLeft(member))
    }

    /// Seats a member whose position was assigned elsewhere (by the rendezvous
    /// server). Fails if that would break seat uniqueness or move a present peer.
    pub fn admit(&mut self, member: RoomMember) -> Result<Option<MembershipEvent>, MembershipError> {
        if member.position.index() >= self.capacity {
            return Err(MembershipError::OutOfRange {
                position: member.position,
                capacity: self.capacity,
            });
        }
        if member.position.is_host() != (member.identity.id == self.host) {
            return Err(MembershipError::HostSeat {
                peer: member.identity.id,
            });
        }
        if let Some(seated) = self.get(&member.identity.id) {
            if seated.position == member.position {
                return Ok(None);
            }
            return Err(MembershipError::Reassignment {
                peer: member.identity.id,
                seated: seated.position,
                requested: member.position,
            });
        }
        if let Some(holder) = self.seats.get(&member.position) {
            return Err(MembershipError::PositionConflict {
                position: member.position,
                holder: holder.identity.id,
            });
        }

        self.seats.insert(member.position, member.clone());
        debug_assert!(self.invariants_hold());
        Ok(Some(MembershipEvent::MemberJoined(member)))
    }

    /// Replaces the roster with an authoritative snapshot and returns what
    /// changed: departures first, then arrivals, each in position order.
    pub fn restore(
        &mut self,
        host: PeerId,
        capacity: usize,
        members: Vec<RoomMember>,
    ) -> Result<Vec<MembershipEvent>, MembershipError> {
        let mut next = Roster::new(host, capacity);
        for member in members {
            next.admit(member)?;
        }

        let mut events: Vec<MembershipEvent> = self
            .seats
            .values()
            .filter(|old| next.seats.get(&old.position) != Some(*old))
            .cloned()
            .map(MembershipEvent::MemberLeft)
            .collect();
        events.extend(
            next.seats
                .values()
                .filter(|new| self.seats.get(&new.position) != Some(*new))
                .cloned()
                .map(MembershipEvent::MemberJoined),
        );

        *self = next;
        Ok(events)
    }

    /// Drops every member except `keep`, returning a leave event for each.
    pub fn retain_only(&mut self, keep: &PeerId) -> Vec<MembershipEvent> {
        let gone: Vec<Position> = self
            .seats
            .values()
            .filter(|m| m.identity.id != *keep)
            .map(|m| m.position)
            .collect();
        gone.into_iter()
            .filter_map(|position| self.seats.remove(&position))
            .map(MembershipEvent::MemberLeft)
            .collect()
    }

    fn free_seat_for(&self, peer: &PeerId) -> Option<Position> {
        if *peer == self.host {
            return Some(Position::HOST).filter(|p| !self.seats.contains_key(p));
        }
        (1..self.capacity)
            .map(|i| Position(i as u8))
            .find(|p| !self.seats.contains_key(p))
    }

    fn invariants_hold(&self) -> bool {
        let mut ids: Vec<PeerId> = self.seats.values().map(|m| m.identity.id).collect();
        ids.sort();
        ids.dedup();

        ids.len() == self.seats.len()
            && self.seats.iter().all(|(position, member)| {
                *position == member.position
                    && position.index() < self.capacity
                    && position.is_host() == (member.identity.id == self.host)
            })
    }
}
