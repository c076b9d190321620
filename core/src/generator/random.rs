use rand::prelude::*;

use super::*;

/// Generation strategy that keeps the first revealed cell and its neighbours clear, but other
/// than that is purely random.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl Default for RandomMineGenerator {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: GameConfig, start: Coord2) -> MineLayout {
        let size = config.size();
        let total_cells = config.total_cells();
        let cols = CellCount::from(config.cols());

        let zone_len = safe_zone(start, size).count() as CellCount;
        let clear_neighbors = if config.mines() + zone_len <= total_cells {
            true
        } else {
            log::warn!(
                "Cannot keep the neighbours of {:?} clear with {} mines on {} cells, only the start cell stays safe",
                start,
                config.mines(),
                total_cells
            );
            false
        };

        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        let mut mines_placed: CellCount = 0;

        // GameConfig guarantees at least one free cell outside the excluded area
        while mines_placed < config.mines() {
            let index = self.rng.random_range(0..total_cells);
            let coords = ((index / cols) as Coord, (index % cols) as Coord);

            let excluded = if clear_neighbors {
                is_adjacent_or_same(start, coords)
            } else {
                coords == start
            };
            if excluded || mines[coords.to_nd_index()] {
                continue;
            }

            mines[coords.to_nd_index()] = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{}, kept {:?} safe",
            mines_placed,
            size.0,
            size.1,
            start
        );
        MineLayout::from_mine_mask(mines)
    }
}
