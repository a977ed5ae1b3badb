use ndarray::Array2;
use smallvec::SmallVec;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for bomb counts and total-cell counts.
pub type CellCount = u16;

/// Row-major cell identifier, `row * width + col`.
pub type CellIndex = CellCount;

/// Two-dimensional coordinates `(row, col)`. Board sizes use the same order, `(height, width)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Flattens in-bounds `(row, col)` into its row-major index.
pub const fn to_cell_index((row, col): Coord2, (_, width): Coord2) -> CellIndex {
    row as CellIndex * width as CellIndex + col as CellIndex
}

/// Inverse of [`to_cell_index`] for an in-bounds index.
pub const fn to_coords(index: CellIndex, (_, width): Coord2) -> Coord2 {
    let width = width as CellIndex;
    ((index / width) as Coord, (index % width) as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        // shapes are always built from `Coord` sizes
        let size = (rows as Coord, cols as Coord);
        NeighborIter::new(index, size)
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// Neighbor indices of every cell of a board shape, computed once and shared by reveals.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NeighborTable {
    size: Coord2,
    neighbors: Vec<SmallVec<[CellIndex; 8]>>,
}

impl NeighborTable {
    pub fn new(size: Coord2) -> Self {
        let (rows, cols) = size;
        let mut neighbors = Vec::with_capacity(mult(rows, cols).into());
        for row in 0..rows {
            for col in 0..cols {
                neighbors.push(
                    NeighborIter::new((row, col), size)
                        .map(|pos| to_cell_index(pos, size))
                        .collect(),
                );
            }
        }
        Self { size, neighbors }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn neighbors(&self, index: CellIndex) -> &[CellIndex] {
        &self.neighbors[usize::from(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_edge_and_inner_cells_have_expected_neighbor_counts() {
        let table = NeighborTable::new((3, 4));

        assert_eq!(table.neighbors(0).len(), 3);
        assert_eq!(table.neighbors(1).len(), 5);
        assert_eq!(table.neighbors(5).len(), 8);
        assert_eq!(table.neighbors(11).len(), 3);
    }

    #[test]
    fn neighbors_match_coordinate_offsets() {
        let size = (3, 4);
        let table = NeighborTable::new(size);

        // (1, 1) in a 4-wide board
        assert_eq!(table.neighbors(5), &[0, 1, 2, 4, 6, 8, 9, 10]);
        assert_eq!(to_coords(9, size), (2, 1));
        assert_eq!(to_cell_index((2, 1), size), 9);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        let table = NeighborTable::new((1, 1));

        assert!(table.neighbors(0).is_empty());
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }
}
