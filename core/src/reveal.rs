use alloc::vec::Vec;

use crate::*;

impl Field {
    /// Reveals the cell at `coords`, cascading through zero-count regions.
    ///
    /// Out-of-bounds or already revealed cells are left alone. Marked cells are revealed
    /// like hidden ones. A mine under the target is defused: it is removed and the counts
    /// around it are refreshed, and the outcome is [`RevealOutcome::Detonated`].
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(cell) = self.cells.get_mut(coords.to_nd_index()) else {
            return RevealOutcome::NoChange;
        };
        if cell.is_revealed() {
            return RevealOutcome::NoChange;
        }

        cell.visibility = Visibility::Revealed;

        if cell.has_mine {
            cell.has_mine = false;
            self.recount_around(coords);
            log::debug!("Defused mine at {:?}", coords);
            return RevealOutcome::Detonated;
        }

        let opened = self.flood_reveal(coords);
        log::debug!("Revealed {:?}, {} cells opened", coords, opened);
        RevealOutcome::Revealed
    }

    /// Opens the neighbours of every zero-count cell reachable from `start`, which must
    /// already be revealed. Cells are revealed as they are pushed, so each one enters the
    /// work-list at most once.
    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut opened: CellCount = 1;
        let mut pending = Vec::from([start]);

        while let Some(current) = pending.pop() {
            if self.cells[current.to_nd_index()].adjacent_mines != 0 {
                continue;
            }

            for pos in self.iter_neighbors(current) {
                let cell = &mut self.cells[pos.to_nd_index()];
                if cell.is_revealed() {
                    continue;
                }
                // a zero-count cell has no mined neighbours
                debug_assert!(!cell.has_mine, "mine next to zero-count cell at {:?}", pos);
                cell.visibility = Visibility::Revealed;
                opened += 1;
                log::trace!("Flood revealed {:?}, count {}", pos, cell.adjacent_mines);
                pending.push(pos);
            }
        }

        opened
    }
}
