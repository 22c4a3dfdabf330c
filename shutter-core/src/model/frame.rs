use serde::{Deserialize, Serialize};

/// Photo frame variants. Toggling walks [`FrameKind::CYCLE`] in order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub enum FrameKind {
    #[default]
    DefaultBlack,
    DefaultWhite,
}

impl FrameKind {
    pub const CYCLE: [FrameKind; 2] = [FrameKind::DefaultBlack, FrameKind::DefaultWhite];

    pub fn next(self) -> Self {
        let index = Self::CYCLE
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or_default();
        Self::CYCLE[(index + 1) % Self::CYCLE.len()]
    }
}
