mod frame;
mod replicated;
mod stickers;

pub use frame::*;
pub use replicated::*;
pub use stickers::*;

/// Everything a room replicates besides membership and lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    pub stickers: StickerCollection,
    pub frame: FrameSelection,
}
