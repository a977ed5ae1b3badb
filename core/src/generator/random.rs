use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniform placement by rejection sampling: draw a cell, keep it if it is not a bomb yet.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator {
    rng: SmallRng,
}

impl RandomLayoutGenerator {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Reproducible sequence of layouts.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomLayoutGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(
        &mut self,
        width: Coord,
        height: Coord,
        bomb_count: CellCount,
    ) -> Result<BoardLayout> {
        let size = (height, width);
        check_board(size, bomb_count)?;

        let total_cells = mult(height, width);
        if u32::from(bomb_count) * 2 > u32::from(total_cells) {
            log::warn!(
                "Dense board, placing {} bombs in {} cells needs many draws",
                bomb_count,
                total_cells
            );
        }

        let mut bomb_mask: Array2<bool> = Array2::default(size.to_nd_index());
        let mut placed: CellCount = 0;
        let mut draws: u64 = 0;
        while placed < bomb_count {
            let index: CellIndex = self.rng.random_range(0..total_cells);
            draws += 1;
            let cell = &mut bomb_mask[to_coords(index, size).to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }
        log::debug!(
            "Placed {} bombs on a {}x{} board in {} draws",
            placed,
            width,
            height,
            draws
        );

        Ok(BoardLayout::from_bomb_mask(bomb_mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_count(layout: &BoardLayout, (row, col): Coord2) -> u8 {
        let (rows, cols) = layout.size();
        let mut count = 0;
        for d_row in -1i16..=1 {
            for d_col in -1i16..=1 {
                if d_row == 0 && d_col == 0 {
                    continue;
                }
                let r = i16::from(row) + d_row;
                let c = i16::from(col) + d_col;
                if r < 0 || c < 0 || r >= i16::from(rows) || c >= i16::from(cols) {
                    continue;
                }
                if layout.bomb_at((r as Coord, c as Coord)).unwrap() {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn places_exact_bomb_count_with_true_adjacency() {
        let mut generator = RandomLayoutGenerator::from_seed(7);
        let configs = [(1, 1, 0), (2, 2, 1), (5, 3, 14), (9, 9, 10), (30, 16, 99)];

        for (width, height, bombs) in configs {
            for _ in 0..20 {
                let layout = generator.generate(width, height, bombs).unwrap();
                assert_eq!(layout.size(), (height, width));
                assert_eq!(layout.bomb_count(), bombs);
                assert_eq!(layout.bomb_indices().count(), usize::from(bombs));

                for row in 0..height {
                    for col in 0..width {
                        let index = to_cell_index((row, col), layout.size());
                        let expected = if layout.is_bomb(index).unwrap() {
                            0
                        } else {
                            brute_force_count(&layout, (row, col))
                        };
                        assert_eq!(layout.adjacent_bomb_count(index), Ok(expected));
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_gives_same_layouts() {
        let mut a = RandomLayoutGenerator::from_seed(42);
        let mut b = RandomLayoutGenerator::from_seed(42);

        for _ in 0..5 {
            assert_eq!(
                a.generate(30, 16, 99).unwrap(),
                b.generate(30, 16, 99).unwrap()
            );
        }
    }

    #[test]
    fn rejects_invalid_configuration_before_sampling() {
        let mut generator = RandomLayoutGenerator::from_seed(0);

        assert_eq!(
            generator.generate(2, 2, 4),
            Err(ConfigError::TooManyBombs {
                requested: 4,
                capacity: 3
            }
            .into())
        );
        assert_eq!(
            generator.generate(0, 0, 0),
            Err(ConfigError::EmptyBoard.into())
        );
    }

    #[test]
    fn closures_act_as_generators() {
        let mut fixed = |width: Coord, height: Coord, _: CellCount| {
            BoardLayout::from_bomb_indices((height, width), &[0])
        };

        let layout = fixed.generate(3, 2, 1).unwrap();

        assert_eq!(layout.size(), (2, 3));
        assert_eq!(layout.is_bomb(0), Ok(true));
    }
}
