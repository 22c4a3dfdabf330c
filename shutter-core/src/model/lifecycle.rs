use serde::{Deserialize, Serialize};
use std::fmt;

/// Room-wide transitions. Serialized names are shared with existing peers.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
pub enum LifecycleEvent {
    #[serde(rename = "startCountDown")]
    StartCountdown,
    #[serde(rename = "navigateToPhotoRoom")]
    NavigateToPhotoRoom,
    #[serde(rename = "navigateToShareRoom")]
    NavigateToShareRoom,
}

impl LifecycleEvent {
    pub fn target(self) -> RoomPhase {
        match self {
            Self::NavigateToPhotoRoom => RoomPhase::PhotoRoom,
            Self::StartCountdown => RoomPhase::Countdown,
            Self::NavigateToShareRoom => RoomPhase::Share,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub enum RoomPhase {
    #[default]
    Waiting,
    PhotoRoom,
    /// Counting down to the capture.
    Countdown,
    Share,
}

impl RoomPhase {
    /// The event that moves a room into this phase. `Waiting` has none.
    pub fn entered_by(self) -> Option<LifecycleEvent> {
        match self {
            Self::Waiting => None,
            Self::PhotoRoom => Some(LifecycleEvent::NavigateToPhotoRoom),
            Self::Countdown => Some(LifecycleEvent::StartCountdown),
            Self::Share => Some(LifecycleEvent::NavigateToShareRoom),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Origin {
    Local,
    Remote,
}

/// A lifecycle transition as seen by subscribers, tagged with where it came from.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LifecycleNotification {
    pub event: LifecycleEvent,
    pub origin: Origin,
}

impl LifecycleNotification {
    pub fn name(&self) -> &'static str {
        match (self.origin, self.event) {
            (Origin::Local, LifecycleEvent::StartCountdown) => "startCountDown",
            (Origin::Local, LifecycleEvent::NavigateToPhotoRoom) => "navigateToPhotoRoom",
            (Origin::Local, LifecycleEvent::NavigateToShareRoom) => "navigateToShareRoom",
            (Origin::Remote, LifecycleEvent::StartCountdown) => "receiveStartCountDown",
            (Origin::Remote, LifecycleEvent::NavigateToPhotoRoom) => "receiveNavigateToPhotoRoom",
            (Origin::Remote, LifecycleEvent::NavigateToShareRoom) => "receiveNavigateToShareRoom",
        }
    }
}

impl fmt::Display for LifecycleNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
