use crate::*;
pub use random::*;

mod random;

/// Source of bomb layouts, called once per game start or reset.
pub trait LayoutGenerator {
    fn generate(&mut self, width: Coord, height: Coord, bomb_count: CellCount)
    -> Result<BoardLayout>;
}

impl<F> LayoutGenerator for F
where
    F: FnMut(Coord, Coord, CellCount) -> Result<BoardLayout>,
{
    fn generate(
        &mut self,
        width: Coord,
        height: Coord,
        bomb_count: CellCount,
    ) -> Result<BoardLayout> {
        self(width, height, bomb_count)
    }
}
