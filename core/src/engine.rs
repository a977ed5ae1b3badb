use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Active,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game session: the board, its per-cell state, lives and phase.
///
/// Mutations after the game is won or lost are silent no-ops, so input queued before the
/// end of a game is harmless. Coordinates outside the board are reported as
/// [`GameError::OutOfRange`].
#[derive(Clone, Debug)]
pub struct GridEngine<G = RandomLayoutGenerator> {
    config: BoardConfig,
    generator: G,
    layout: BoardLayout,
    neighbors: NeighborTable,
    cells: Array2<CellState>,
    revealed_count: CellCount,
    lives: u8,
    phase: Phase,
}

impl GridEngine {
    pub fn new(config: BoardConfig) -> Result<Self> {
        Self::with_generator(config, RandomLayoutGenerator::new())
    }
}

impl<G: LayoutGenerator> GridEngine<G> {
    pub fn with_generator(config: BoardConfig, mut generator: G) -> Result<Self> {
        let layout = generate_layout(&mut generator, &config)?;
        let size = config.size();
        log::debug!("New game, config: {:?}", config);
        Ok(Self {
            config,
            generator,
            layout,
            neighbors: NeighborTable::new(size),
            cells: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            lives: config.max_lives,
            phase: Phase::Active,
        })
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_won(&self) -> bool {
        matches!(self.phase, Phase::Won)
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn max_lives(&self) -> u8 {
        self.config.max_lives
    }

    /// Revealed cells, hit bombs included.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.mark == Mark::Flagged)
            .count() as CellCount
    }

    pub fn index_of(&self, row: Coord, col: Coord) -> Result<CellIndex> {
        let (rows, cols) = self.size();
        if row < rows && col < cols {
            Ok(to_cell_index((row, col), self.size()))
        } else {
            Err(GameError::OutOfRange)
        }
    }

    pub fn coords_of(&self, index: CellIndex) -> Result<Coord2> {
        if index < self.config.total_cells() {
            Ok(to_coords(index, self.size()))
        } else {
            Err(GameError::OutOfRange)
        }
    }

    pub fn cell_view(&self, row: Coord, col: Coord) -> Result<CellView> {
        let index = self.index_of(row, col)?;
        Ok(self.view_at(index))
    }

    pub fn cell_view_at(&self, index: CellIndex) -> Result<CellView> {
        self.coords_of(index)?;
        Ok(self.view_at(index))
    }

    fn view_at(&self, index: CellIndex) -> CellView {
        let cell = self.cell(index);
        if !cell.revealed {
            CellView::Hidden { mark: cell.mark }
        } else if self.layout.has_bomb(index) {
            CellView::Bomb
        } else {
            CellView::Safe(self.layout.count_at(index))
        }
    }

    pub fn reveal(&mut self, row: Coord, col: Coord) -> Result<RevealResult> {
        let index = self.index_of(row, col)?;

        if self.phase.is_finished() {
            log::trace!("Ignoring reveal at {:?}, game is over", (row, col));
            return Ok(RevealResult::unchanged(self.phase));
        }

        let cell = self.cell_mut(index);
        if cell.revealed {
            return Ok(RevealResult::unchanged(self.phase));
        }
        cell.mark = Mark::None;

        if self.layout.has_bomb(index) {
            self.cell_mut(index).revealed = true;
            self.revealed_count += 1;
            self.lives = self.lives.saturating_sub(1);
            log::debug!("Bomb hit at {:?}, lives left: {}", (row, col), self.lives);
            if self.lives == 0 {
                self.end_game(Phase::Lost);
            }
            return Ok(RevealResult {
                changed: vec![index],
                hit: Some(BombHit {
                    index,
                    lives_left: self.lives,
                }),
                phase: self.phase,
            });
        }

        let changed = self.flood_reveal(index);
        self.check_win();

        Ok(RevealResult {
            changed,
            hit: None,
            phase: self.phase,
        })
    }

    /// Reveals `start` and, through zero cells, the connected region around it.
    fn flood_reveal(&mut self, start: CellIndex) -> Vec<CellIndex> {
        let mut changed = Vec::new();
        let mut to_visit = VecDeque::from([start]);

        while let Some(index) = to_visit.pop_front() {
            let cell = self.cell_mut(index);
            if cell.revealed {
                continue;
            }
            cell.revealed = true;
            cell.mark = Mark::None;
            self.revealed_count += 1;
            changed.push(index);

            let count = self.layout.count_at(index);
            log::trace!("Flood revealed cell {}, bomb count: {}", index, count);

            // numbered cells bound the flood
            if count > 0 {
                continue;
            }

            to_visit.extend(
                self.neighbors
                    .neighbors(index)
                    .iter()
                    .copied()
                    .filter(|&pos| !self.layout.has_bomb(pos) && !self.cell(pos).revealed),
            );
        }

        changed
    }

    pub fn toggle_mark(&mut self, row: Coord, col: Coord) -> Result<MarkOutcome> {
        let index = self.index_of(row, col)?;

        if self.phase.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = self.cell_mut(index);
        if cell.revealed {
            return Ok(MarkOutcome::NoChange);
        }
        cell.mark = cell.mark.next();
        Ok(MarkOutcome::Changed(cell.mark))
    }

    /// Whether every safe cell is revealed; moves an active game to [`Phase::Won`] when it is.
    pub fn check_win(&mut self) -> bool {
        let all_safe_revealed = self
            .cells
            .iter()
            .zip(self.layout.bomb_mask.iter())
            .all(|(cell, &is_bomb)| is_bomb || cell.revealed);

        if all_safe_revealed && self.phase.is_active() {
            self.end_game(Phase::Won);
        }
        all_safe_revealed
    }

    /// Starts over with `config`, regenerating the bomb layout.
    pub fn reset(&mut self, config: BoardConfig) -> Result<()> {
        let layout = generate_layout(&mut self.generator, &config)?;
        let size = config.size();
        if self.neighbors.size() != size {
            self.neighbors = NeighborTable::new(size);
        }
        self.config = config;
        self.layout = layout;
        self.cells = Array2::default(size.to_nd_index());
        self.revealed_count = 0;
        self.lives = config.max_lives;
        self.phase = Phase::Active;
        log::debug!("Game reset, config: {:?}", config);
        Ok(())
    }

    /// Plays again with the current configuration.
    pub fn restart(&mut self) -> Result<()> {
        self.reset(self.config)
    }

    fn end_game(&mut self, phase: Phase) {
        log::debug!(
            "Game ended: {:?}, revealed {} of {} cells",
            phase,
            self.revealed_count,
            self.config.total_cells()
        );
        self.phase = phase;
    }

    fn cell(&self, index: CellIndex) -> CellState {
        self.cells[to_coords(index, self.size()).to_nd_index()]
    }

    fn cell_mut(&mut self, index: CellIndex) -> &mut CellState {
        let size = self.size();
        &mut self.cells[to_coords(index, size).to_nd_index()]
    }
}

fn generate_layout<G: LayoutGenerator>(
    generator: &mut G,
    config: &BoardConfig,
) -> Result<BoardLayout> {
    config.validate()?;
    let layout = generator.generate(config.width, config.height, config.bomb_count)?;
    if layout.size() != config.size() || layout.bomb_count() != config.bomb_count {
        log::warn!(
            "Generated layout {:?} with {} bombs does not match {:?}",
            layout.size(),
            layout.bomb_count(),
            config
        );
        return Err(ConfigError::LayoutMismatch.into());
    }
    Ok(layout)
}
