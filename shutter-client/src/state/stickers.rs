use crate::state::{Reconcile, Replicated, replace_if_changed};
use shutter_core::{RoomPayload, Sticker};

/// The room's sticker collection. Replicated at collection granularity:
/// a remote collection that differs replaces ours outright.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StickerCollection {
    stickers: Vec<Sticker>,
}

impl StickerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }
}

impl Replicated for StickerCollection {
    type Value = Vec<Sticker>;
    type Delta = Sticker;

    fn current_value(&self) -> &Vec<Sticker> {
        &self.stickers
    }

    fn apply_local(&mut self, sticker: Sticker) -> Vec<Sticker> {
        self.stickers.push(sticker);
        self.stickers.clone()
    }

    fn apply_remote(&mut self, value: Vec<Sticker>) -> Reconcile {
        replace_if_changed(&mut self.stickers, value)
    }

    fn payload(&self) -> RoomPayload {
        RoomPayload::Stickers(self.stickers.clone())
    }
}
