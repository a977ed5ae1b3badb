//! Grid engine for a lives-based minesweeper: bomb layouts, adjacency counts, flood-fill
//! reveals, cell marks, and win/loss tracking. Rendering and input are left to the host.

use ndarray::Array2;

pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use prompt::*;
pub use types::*;

mod cell;
mod config;
mod engine;
mod error;
mod generator;
mod prompt;
mod types;

/// Starts a session for one of the preset difficulties, identified by its lives (4, 2 or 0).
pub fn start_game(difficulty_lives: u8) -> Result<GridEngine> {
    let difficulty = Difficulty::from_lives(difficulty_lives)?;
    log::debug!("Starting {:?} game", difficulty);
    GridEngine::new(difficulty.board_config())
}

/// Bomb placement and the adjacency counts derived from it, fixed for one generation.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardLayout {
    bomb_mask: Array2<bool>,
    adjacent_counts: Array2<u8>,
    bomb_count: CellCount,
}

impl BoardLayout {
    /// Expects a mask whose shape fits in [`Coord`] on both axes.
    pub(crate) fn from_bomb_mask(bomb_mask: Array2<bool>) -> Self {
        let bomb_count = bomb_mask.iter().filter(|&&is_bomb| is_bomb).count() as CellCount;
        let adjacent_counts = Array2::from_shape_fn(bomb_mask.dim(), |(row, col)| {
            if bomb_mask[[row, col]] {
                return 0;
            }
            bomb_mask
                .iter_neighbors((row as Coord, col as Coord))
                .filter(|&pos| bomb_mask[pos.to_nd_index()])
                .count() as u8
        });
        Self {
            bomb_mask,
            adjacent_counts,
            bomb_count,
        }
    }

    /// Builds a layout with bombs at the given row-major indices. Duplicates count once.
    pub fn from_bomb_indices(size: Coord2, bomb_indices: &[CellIndex]) -> Result<Self> {
        let total_cells = mult(size.0, size.1);
        if total_cells == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }

        let mut bomb_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &index in bomb_indices {
            if index >= total_cells {
                return Err(GameError::OutOfRange);
            }
            bomb_mask[to_coords(index, size).to_nd_index()] = true;
        }

        let layout = Self::from_bomb_mask(bomb_mask);
        check_board(size, layout.bomb_count)?;
        Ok(layout)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.bomb_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.bomb_mask.len() as CellCount
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.bomb_count
    }

    pub fn is_bomb(&self, index: CellIndex) -> Result<bool> {
        let coords = self.checked_coords(index)?;
        Ok(self.bomb_mask[coords.to_nd_index()])
    }

    pub fn bomb_at(&self, (row, col): Coord2) -> Result<bool> {
        let (rows, cols) = self.size();
        if row < rows && col < cols {
            Ok(self.bomb_mask[(row, col).to_nd_index()])
        } else {
            Err(GameError::OutOfRange)
        }
    }

    /// Bombs among the neighbors of `index`, always 0 for bomb cells.
    pub fn adjacent_bomb_count(&self, index: CellIndex) -> Result<u8> {
        let coords = self.checked_coords(index)?;
        Ok(self.adjacent_counts[coords.to_nd_index()])
    }

    fn checked_coords(&self, index: CellIndex) -> Result<Coord2> {
        if index < self.total_cells() {
            Ok(to_coords(index, self.size()))
        } else {
            Err(GameError::OutOfRange)
        }
    }

    /// Unchecked [`Self::is_bomb`] for indices the engine already validated.
    pub(crate) fn has_bomb(&self, index: CellIndex) -> bool {
        self.bomb_mask[to_coords(index, self.size()).to_nd_index()]
    }

    /// Unchecked [`Self::adjacent_bomb_count`].
    pub(crate) fn count_at(&self, index: CellIndex) -> u8 {
        self.adjacent_counts[to_coords(index, self.size()).to_nd_index()]
    }

    pub fn bomb_indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.bomb_mask
            .iter()
            .enumerate()
            .filter(|&(_, &is_bomb)| is_bomb)
            .map(|(index, _)| index as CellIndex)
    }
}

/// What a reveal changed, for the presentation layer to re-render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealResult {
    /// Cells whose revealed or mark state changed, in reveal order.
    pub changed: Vec<CellIndex>,
    pub hit: Option<BombHit>,
    pub phase: Phase,
}

impl RevealResult {
    pub(crate) fn unchanged(phase: Phase) -> Self {
        Self {
            changed: Vec::new(),
            hit: None,
            phase,
        }
    }

    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }

    pub fn hit_bomb(&self) -> bool {
        self.hit.is_some()
    }

    pub fn game_ended(&self) -> bool {
        self.has_update() && self.phase.is_finished()
    }

    /// Message the host should show in response to this reveal, if any.
    pub fn prompt(&self) -> Option<Prompt> {
        if !self.has_update() {
            return None;
        }
        match (self.hit, self.phase) {
            (Some(_), Phase::Lost) => Some(Prompt::GameOver),
            (Some(hit), _) => Some(Prompt::HitMine {
                lives_left: hit.lives_left,
            }),
            (None, Phase::Won) => Some(Prompt::Won),
            (None, _) => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BombHit {
    pub index: CellIndex,
    pub lives_left: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed(Mark),
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_counts_bomb_neighbors() {
        // 3x3 with bombs at the top-left and bottom-right corners
        let layout = BoardLayout::from_bomb_indices((3, 3), &[0, 8]).unwrap();

        assert_eq!(layout.bomb_count(), 2);
        assert_eq!(layout.safe_cell_count(), 7);
        assert_eq!(layout.adjacent_bomb_count(4), Ok(2));
        assert_eq!(layout.adjacent_bomb_count(2), Ok(0));
        assert_eq!(layout.adjacent_bomb_count(1), Ok(1));
        assert_eq!(layout.adjacent_bomb_count(0), Ok(0));
        assert_eq!(layout.bomb_at((2, 2)), Ok(true));
        assert_eq!(layout.bomb_indices().collect::<Vec<_>>(), vec![0, 8]);
    }

    #[test]
    fn layout_rejects_bad_input() {
        assert_eq!(
            BoardLayout::from_bomb_indices((2, 2), &[4]),
            Err(GameError::OutOfRange)
        );
        assert_eq!(
            BoardLayout::from_bomb_indices((0, 3), &[]),
            Err(ConfigError::EmptyBoard.into())
        );
        assert_eq!(
            BoardLayout::from_bomb_indices((1, 2), &[0, 1]),
            Err(ConfigError::TooManyBombs {
                requested: 2,
                capacity: 1
            }
            .into())
        );
    }

    #[test]
    fn layout_queries_outside_the_board_are_errors() {
        let layout = BoardLayout::from_bomb_indices((2, 2), &[0]).unwrap();

        assert_eq!(layout.is_bomb(4), Err(GameError::OutOfRange));
        assert_eq!(layout.adjacent_bomb_count(4), Err(GameError::OutOfRange));
        assert_eq!(layout.bomb_at((2, 0)), Err(GameError::OutOfRange));
        assert_eq!(layout.bomb_at((0, 2)), Err(GameError::OutOfRange));
        assert_eq!(layout.is_bomb(3), Ok(false));
        assert_eq!(layout.adjacent_bomb_count(3), Ok(1));
    }

    #[test]
    fn duplicate_bomb_indices_count_once() {
        let layout = BoardLayout::from_bomb_indices((2, 2), &[3, 3]).unwrap();

        assert_eq!(layout.bomb_count(), 1);
    }

    #[test]
    fn prompt_follows_reveal_result() {
        let hit = BombHit {
            index: 0,
            lives_left: 1,
        };

        let survived = RevealResult {
            changed: vec![0],
            hit: Some(hit),
            phase: Phase::Active,
        };
        assert_eq!(survived.prompt(), Some(Prompt::HitMine { lives_left: 1 }));
        assert!(survived.hit_bomb());
        assert!(!survived.game_ended());

        let lost = RevealResult {
            changed: vec![0],
            hit: Some(BombHit {
                lives_left: 0,
                ..hit
            }),
            phase: Phase::Lost,
        };
        assert_eq!(lost.prompt(), Some(Prompt::GameOver));
        assert!(lost.game_ended());

        let won = RevealResult {
            changed: vec![1, 2],
            hit: None,
            phase: Phase::Won,
        };
        assert_eq!(won.prompt(), Some(Prompt::Won));
        assert!(!won.hit_bomb());

        assert_eq!(RevealResult::unchanged(Phase::Won).prompt(), None);
        assert!(!RevealResult::unchanged(Phase::Won).game_ended());
    }

    #[test]
    fn start_game_uses_presets() {
        let engine = start_game(2).unwrap();

        assert_eq!(engine.size(), (16, 30));
        assert_eq!(engine.lives(), 2);
        assert_eq!(engine.config().bomb_count, 99);
        assert_eq!(engine.phase(), Phase::Active);
        assert_eq!(
            start_game(3).unwrap_err(),
            GameError::InvalidConfiguration(ConfigError::UnknownDifficulty(3))
        );
    }
}
