use crate::event::SessionEvent;
use crate::signaling::Outbox;
use shutter_core::{
    LifecycleEvent, LifecycleNotification, Origin, PhaseTransition, RoomPayload, RoomStateMachine,
    SendError,
};
use tokio::sync::broadcast;
use tracing::debug;

/// A lifecycle transition this peer wants to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalIntent(LifecycleEvent);

impl LocalIntent {
    pub fn start_countdown() -> Self {
        Self(LifecycleEvent::StartCountdown)
    }

    pub fn navigate_to_photo_room() -> Self {
        Self(LifecycleEvent::NavigateToPhotoRoom)
    }

    pub fn navigate_to_share_room() -> Self {
        Self(LifecycleEvent::NavigateToShareRoom)
    }

    pub fn event(self) -> LifecycleEvent {
        self.0
    }
}

/// A lifecycle transition another peer made. Only built from received frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteEvent(LifecycleEvent);

impl RemoteEvent {
    pub(crate) fn received(event: LifecycleEvent) -> Self {
        Self(event)
    }

    pub fn event(self) -> LifecycleEvent {
        self.0
    }
}

/// Applies lifecycle transitions and announces the ones that took effect.
///
/// Local intents are applied then broadcast. Remote events are applied only;
/// [`LifecycleBus::deliver`] takes no [`Outbox`], so they cannot be re-sent.
#[derive(Debug, Clone)]
pub struct LifecycleBus {
    events: broadcast::Sender<SessionEvent>,
}

impl LifecycleBus {
    pub fn new(events: broadcast::Sender<SessionEvent>) -> Self {
        Self { events }
    }

    pub fn publish(
        &self,
        intent: LocalIntent,
        machine: &mut RoomStateMachine,
        outbox: &impl Outbox,
    ) -> Result<PhaseTransition, SendError> {
        let transition = machine.apply_lifecycle(intent.event());
        if transition.is_applied() {
            self.notify(intent.event(), Origin::Local);
            outbox.broadcast(RoomPayload::Lifecycle(intent.event()))?;
        }
        Ok(transition)
    }

    pub fn deliver(&self, event: RemoteEvent, machine: &mut RoomStateMachine) -> PhaseTransition {
        let transition = machine.apply_lifecycle(event.event());
        if transition.is_applied() {
            self.notify(event.event(), Origin::Remote);
        }
        transition
    }

    fn notify(&self, event: LifecycleEvent, origin: Origin) {
        let notification = LifecycleNotification { event, origin };
        debug!("Lifecycle: {}", notification);
        let _ = self.events.send(SessionEvent::Lifecycle(notification));
    }
}
