use crate::model::peer::PeerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct StickerId(pub Uuid);

impl StickerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StickerId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum StickerKind {
    Emoji(String),
    Custom(String),
}

/// Where a sticker sits on the photo canvas, in normalized `[0, 1]` coordinates.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sticker {
    pub id: StickerId,
    pub kind: StickerKind,
    pub position: CanvasPoint,
    pub created_by: PeerId,
}

impl Sticker {
    pub fn new(kind: StickerKind, position: CanvasPoint, created_by: PeerId) -> Self {
        Self {
            id: StickerId::new(),
            kind,
            position,
            created_by,
        }
    }
}
