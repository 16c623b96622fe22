use super::*;

/// Uniform placement by rejection sampling: draw a random cell, keep it if it has no mine
/// yet, repeat until enough mines are down.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, size: Coord2, mines: CellCount) -> MineLayout {
        use rand::prelude::*;

        let total_cells = mult(size.0, size.1);
        let mut layout = MineLayout {
            mine_mask: Array2::default(size.to_nd_index()),
            mine_count: 0,
        };

        // sampling would never finish on a full board
        if mines >= total_cells {
            if mines > total_cells {
                log::warn!(
                    "Minefield already full, requested {} but only fits {}",
                    mines,
                    total_cells
                );
            }
            layout.mine_mask.fill(true);
            layout.mine_count = total_cells;
            return layout;
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut rejected = 0usize;
        while layout.mine_count < mines {
            let coords = (rng.random_range(0..size.0), rng.random_range(0..size.1));
            if layout[coords] {
                rejected += 1;
                continue;
            }
            layout[coords] = true;
            layout.mine_count += 1;
        }
        log::trace!(
            "Placed {} mines with {} rejected samples (seed {})",
            mines,
            rejected,
            self.seed
        );

        layout
    }
}
