use crate::state::{Reconcile, Replicated, replace_if_changed};
use shutter_core::{FrameKind, RoomPayload};

/// Advance the frame to the next one in the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToggle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSelection {
    frame: FrameKind,
}

impl FrameSelection {
    pub fn new(frame: FrameKind) -> Self {
        Self { frame }
    }
}

impl Replicated for FrameSelection {
    type Value = FrameKind;
    type Delta = FrameToggle;

    fn current_value(&self) -> &FrameKind {
        &self.frame
    }

    fn apply_local(&mut self, _: FrameToggle) -> FrameKind {
        self.frame = self.frame.next();
        self.frame
    }

    fn apply_remote(&mut self, value: FrameKind) -> Reconcile {
        replace_if_changed(&mut self.frame, value)
    }

    fn payload(&self) -> RoomPayload {
        RoomPayload::Frame(self.frame)
    }
}
