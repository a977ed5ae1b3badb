use serde::{Deserialize, Serialize};

/// Player annotation on an unrevealed cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    None,
    Flagged,
    Questioned,
}

impl Mark {
    /// Next mark in the `None -> Flagged -> Questioned -> None` rotation.
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Flagged,
            Self::Flagged => Self::Questioned,
            Self::Questioned => Self::None,
        }
    }

    pub const fn is_marked(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Default for Mark {
    fn default() -> Self {
        Self::None
    }
}

/// Per-cell state owned by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CellState {
    pub revealed: bool,
    pub mark: Mark,
}

/// What the presentation layer may know about a cell. Hidden cells never expose bombs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden { mark: Mark },
    Bomb,
    Safe(u8),
}

impl CellView {
    pub const fn is_revealed(self) -> bool {
        !matches!(self, Self::Hidden { .. })
    }

    pub const fn mark(self) -> Mark {
        match self {
            Self::Hidden { mark } => mark,
            Self::Bomb | Self::Safe(_) => Mark::None,
        }
    }
}
