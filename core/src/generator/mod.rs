use crate::*;
pub use random::*;

mod random;

/// Produces a mine layout for a field of `size`.
pub trait MineGenerator {
    fn generate(self, size: Coord2, mines: CellCount) -> MineLayout;
}

/// An explicit layout places exactly its own mines, whatever count was asked for.
impl MineGenerator for MineLayout {
    fn generate(self, size: Coord2, _mines: CellCount) -> MineLayout {
        if self.size() != size {
            log::warn!(
                "Explicit layout is {:?} but the field is {:?}",
                self.size(),
                size
            );
        }
        self
    }
}
