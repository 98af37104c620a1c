use super::*;

/// Uniform rejection sampling that keeps one cell, normally the first click, free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    exclude: Coord2,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, exclude: Coord2) -> Self {
        Self { seed, exclude }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let (rows, cols) = config.size;
        let excluded_in_bounds = self.exclude.0 < rows && self.exclude.1 < cols;
        let free_cells = config.total_cells() - CellCount::from(excluded_in_bounds);

        let mines = if config.mines > free_cells {
            log::warn!(
                "Minefield too small, requested {} mines but only {} fit",
                config.mines,
                free_cells
            );
            free_cells
        } else {
            config.mines
        };

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed = 0;
        let mut rejected = 0u32;

        while placed < mines {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            if mine_mask[coords.to_nd_index()] || coords == self.exclude {
                rejected += 1;
                continue;
            }
            mine_mask[coords.to_nd_index()] = true;
            placed += 1;
        }
        log::trace!("placed {} mines, {} samples rejected", placed, rejected);

        let layout = MineLayout::from_mine_mask(mine_mask);

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        layout
    }
}
