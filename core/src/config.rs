use serde::{Deserialize, Serialize};

use crate::*;

/// Board width shared by every preset.
pub const PRESET_WIDTH: Coord = 30;
/// Board height shared by every preset.
pub const PRESET_HEIGHT: Coord = 16;
/// Bomb count shared by every preset.
pub const PRESET_BOMBS: CellCount = 99;

/// Immutable parameters of one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub bomb_count: CellCount,
    /// Bomb hits the player can take; 0 means the first hit ends the game.
    pub max_lives: u8,
}

impl BoardConfig {
    pub const fn new(width: Coord, height: Coord, bomb_count: CellCount, max_lives: u8) -> Self {
        Self {
            width,
            height,
            bomb_count,
            max_lives,
        }
    }

    /// `(height, width)`, the same order as cell coordinates.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub fn validate(&self) -> Result<()> {
        check_board(self.size(), self.bomb_count)
    }
}

impl From<Difficulty> for BoardConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.board_config()
    }
}

/// Rejects empty boards and boards with no room for a safe cell.
pub(crate) fn check_board((height, width): Coord2, bomb_count: CellCount) -> Result<()> {
    if height == 0 || width == 0 {
        return Err(ConfigError::EmptyBoard.into());
    }

    let total_cells = mult(height, width);
    if bomb_count >= total_cells {
        return Err(ConfigError::TooManyBombs {
            requested: bomb_count,
            capacity: total_cells - 1,
        }
        .into());
    }

    Ok(())
}

/// Preset difficulties, which only differ in the number of lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Extreme];

    pub const fn lives(self) -> u8 {
        match self {
            Self::Easy => 4,
            Self::Medium => 2,
            Self::Extreme => 0,
        }
    }

    pub fn from_lives(lives: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.lives() == lives)
            .ok_or(ConfigError::UnknownDifficulty(lives).into())
    }

    /// Menu label for the preset.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy (4 Lives)",
            Self::Medium => "Medium (2 Lives)",
            Self::Extreme => "Extreme (No Lives)",
        }
    }

    pub const fn board_config(self) -> BoardConfig {
        BoardConfig::new(PRESET_WIDTH, PRESET_HEIGHT, PRESET_BOMBS, self.lives())
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(lives: u8) -> Result<Self> {
        Self::from_lives(lives)
    }
}
