use ndarray::{Array2, Zip};

use crate::*;

/// The authoritative grid. Cells are plain values stored row-major, so `(column, row)`
/// lives at `row * width + column`.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub(crate) cells: Array2<Cell>,
}

impl Field {
    /// Creates a field with every cell hidden and no mines placed yet.
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
        })
    }

    /// Size as `(width, height)`.
    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size().0, self.size().1)
    }

    /// How many mines random placement puts on this field.
    pub fn mine_target(&self) -> CellCount {
        default_mine_count(self.size())
    }

    /// How many mines are currently on the field.
    pub fn mine_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.has_mine).count() as CellCount
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (width, height) = self.size();
        coords.0 < width && coords.1 < height
    }

    /// The cell at `coords`, `None` when out of bounds.
    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_some_and(Cell::is_revealed)
    }

    pub fn is_marked(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_some_and(Cell::is_marked)
    }

    pub fn has_mine(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_some_and(Cell::has_mine)
    }

    /// All cells with their coordinates, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), &cell)| ((x as Coord, y as Coord), cell))
    }

    /// Hidden -> Marked, anything else is left alone.
    pub fn mark(&mut self, coords: Coord2) -> MarkOutcome {
        self.transition(coords, Visibility::Hidden, Visibility::Marked)
    }

    /// Marked -> Hidden, anything else is left alone.
    pub fn unmark(&mut self, coords: Coord2) -> MarkOutcome {
        self.transition(coords, Visibility::Marked, Visibility::Hidden)
    }

    fn transition(&mut self, coords: Coord2, from: Visibility, to: Visibility) -> MarkOutcome {
        match self.cells.get_mut(coords.to_nd_index()) {
            Some(cell) if cell.visibility == from => {
                cell.visibility = to;
                log::debug!("Cell at {:?}: {:?} -> {:?}", coords, from, to);
                MarkOutcome::Changed
            }
            _ => MarkOutcome::NoChange,
        }
    }

    /// Replaces the mine layout with `layout` and recounts every cell.
    ///
    /// Fails without touching the field when the layout has a different size. Revealed
    /// cells never hold a mine, so layout mines under them are dropped.
    pub fn place_mines(&mut self, layout: &MineLayout) -> Result<()> {
        layout.check_size(self.size())?;
        self.apply_layout(layout);
        Ok(())
    }

    /// Places `mine_target` mines uniformly at random, seeded for reproducibility.
    pub fn place_mines_randomly(&mut self, seed: u64) {
        let layout = RandomMineGenerator::new(seed).generate(self.size(), self.mine_target());
        self.apply_layout(&layout);
    }

    pub fn place_mines_with<G: MineGenerator>(&mut self, generator: G) -> Result<()> {
        let layout = generator.generate(self.size(), self.mine_target());
        self.place_mines(&layout)
    }

    fn apply_layout(&mut self, layout: &MineLayout) {
        let mut dropped: CellCount = 0;
        Zip::from(&mut self.cells)
            .and(&layout.mine_mask)
            .for_each(|cell, &is_mine| {
                if is_mine && cell.is_revealed() {
                    dropped += 1;
                    cell.has_mine = false;
                } else {
                    cell.has_mine = is_mine;
                }
            });
        if dropped > 0 {
            log::warn!("Dropped {} layout mines under revealed cells", dropped);
        }

        self.recount_all();
        log::debug!(
            "Placed {} mines on a {:?} field",
            self.mine_count(),
            self.size()
        );
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub(crate) fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].has_mine)
            .count() as u8
    }

    /// Recounts `coords` and each of its neighbours.
    pub(crate) fn recount_around(&mut self, coords: Coord2) {
        self.recount(coords);
        for pos in self.iter_neighbors(coords) {
            self.recount(pos);
        }
    }

    pub(crate) fn recount_all(&mut self) {
        let (x_end, y_end) = self.size();
        for y in 0..y_end {
            for x in 0..x_end {
                self.recount((x, y));
            }
        }
    }

    fn recount(&mut self, coords: Coord2) {
        let count = self.count_adjacent_mines(coords);
        self.cells[coords.to_nd_index()].adjacent_mines = count;
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn new_field_is_hidden_and_empty() {
        let field = Field::new((4, 3)).unwrap();

        assert_eq!(field.size(), (4, 3));
        assert_eq!(field.total_cells(), 12);
        assert_eq!(field.mine_count(), 0);
        assert_eq!(field.mine_target(), 3);
        assert!(
            field
                .iter_cells()
                .all(|(_, cell)| cell.visibility() == Visibility::Hidden)
        );
    }

    #[test]
    fn zero_sized_field_is_rejected() {
        assert_eq!(Field::new((0, 3)), Err(GameError::InvalidSize));
        assert_eq!(Field::new((3, 0)), Err(GameError::InvalidSize));
    }

    #[test]
    fn out_of_bounds_reads_are_false() {
        let field = field_with_mines((2, 2), &[(1, 1)]);

        assert!(field.has_mine((1, 1)));
        assert!(!field.has_mine((2, 1)));
        assert!(!field.is_revealed((0, 2)));
        assert!(!field.is_marked((9, 9)));
        assert_eq!(field.cell_at((2, 0)), None);
        assert!(!field.contains((2, 0)));
    }

    #[test]
    fn place_mines_computes_counts() {
        let field = field_with_mines((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.cell_at((1, 1)).unwrap().adjacent_mines(), 2);
        assert_eq!(field.cell_at((2, 0)).unwrap().adjacent_mines(), 0);
        assert_eq!(field.cell_at((0, 1)).unwrap().adjacent_mines(), 1);
        assert_counts_consistent(&field);
    }

    #[test]
    fn place_mines_shape_mismatch_leaves_field_unchanged() {
        let mut field = field_with_mines((3, 3), &[(1, 1)]);
        let before = field.clone();
        let layout = MineLayout::from_mine_coords((3, 2), &[(0, 0)]).unwrap();

        assert_eq!(
            field.place_mines(&layout),
            Err(GameError::ShapeMismatch {
                expected: (3, 3),
                found: (3, 2),
            })
        );
        assert_eq!(field, before);
    }

    #[test]
    fn place_mines_skips_revealed_cells() {
        let mut field = field_with_mines((3, 1), &[(1, 0)]);
        field.reveal((0, 0));
        assert!(!field.is_revealed((2, 0)));
        let layout = MineLayout::from_mine_coords((3, 1), &[(0, 0), (2, 0)]).unwrap();

        field.place_mines(&layout).unwrap();

        assert!(!field.has_mine((0, 0)));
        assert!(!field.has_mine((1, 0)));
        assert!(field.has_mine((2, 0)));
        assert_no_revealed_mines(&field);
        assert_counts_consistent(&field);
    }

    #[test]
    fn mark_and_unmark() {
        let mut field = field_with_mines((2, 2), &[(0, 0)]);
        let before = field.clone();

        assert_eq!(field.mark((1, 0)), MarkOutcome::Changed);
        assert!(field.is_marked((1, 0)));
        assert_eq!(field.mark((1, 0)), MarkOutcome::NoChange);

        assert_eq!(field.unmark((1, 0)), MarkOutcome::Changed);
        assert_eq!(field, before);
        assert_eq!(field.unmark((1, 0)), MarkOutcome::NoChange);
    }

    #[test]
    fn revealed_cells_cannot_be_marked() {
        let mut field = field_with_mines((2, 2), &[(0, 0)]);
        field.reveal((1, 1));

        assert_eq!(field.mark((1, 1)), MarkOutcome::NoChange);
        assert_eq!(field.unmark((1, 1)), MarkOutcome::NoChange);
        assert!(field.is_revealed((1, 1)));
    }

    #[test]
    fn out_of_bounds_marks_are_no_ops() {
        let mut field = Field::new((2, 2)).unwrap();
        let before = field.clone();

        assert_eq!(field.mark((2, 0)), MarkOutcome::NoChange);
        assert_eq!(field.unmark((0, 2)), MarkOutcome::NoChange);
        assert_eq!(field, before);
    }
}
