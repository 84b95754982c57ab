use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::grid::{Connectivity, Grid};
use super::neighbors::NeighborOrder;
use super::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    Rock,
    Floor,
}

impl Terrain {
    pub fn is_open(&self) -> bool {
        matches!(self, Terrain::Floor)
    }

    pub fn symbol(&self) -> char {
        match self {
            Terrain::Rock => '#',
            Terrain::Floor => '.',
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Carves a single connected cave out of solid rock.
///
/// Growth starts at the centre cell and repeatedly picks a random cell on the
/// open frontier, opening its rock neighbors in the order the neighbor
/// provider hands out. Four-connected growth keeps corridors walkable without
/// diagonal squeezes.
pub struct CaveGenerator {
    width: usize,
    height: usize,
    open_ratio: f64,
}

impl CaveGenerator {
    pub fn new(width: usize, height: usize, open_ratio: f64) -> Self {
        Self {
            width,
            height,
            open_ratio: open_ratio.clamp(0.0, 1.0),
        }
    }

    pub fn target_open_cells(&self) -> usize {
        let total = self.width.saturating_mul(self.height);
        if total == 0 {
            return 0;
        }
        // The start cell is always opened
        ((total as f64 * self.open_ratio).round() as usize).clamp(1, total)
    }

    pub fn generate<N, R>(&self, order: &N, rng: &mut R) -> Grid<Terrain>
    where
        N: NeighborOrder + ?Sized,
        R: RandomSource + ?Sized,
    {
        let mut grid = Grid::new(self.width, self.height, Terrain::Rock);
        let target = self.target_open_cells();
        if target == 0 {
            return grid;
        }

        let start = (self.width / 2, self.height / 2);
        grid.set(start.0, start.1, Terrain::Floor);
        let mut opened = 1;

        // Open cells that may still have rock neighbors
        let mut frontier = vec![start];
        let mut exhausted = 0usize;

        while opened < target && !frontier.is_empty() {
            let index = rng.next_index(frontier.len());
            let (x, y) = frontier[index];

            let next = grid
                .neighbors(x, y, Connectivity::Four, order, rng)
                .into_iter()
                .find(|&(nx, ny)| grid.get(nx, ny) == Some(&Terrain::Rock));

            match next {
                Some((nx, ny)) => {
                    grid.set(nx, ny, Terrain::Floor);
                    opened += 1;
                    frontier.push((nx, ny));
                }
                None => {
                    frontier.swap_remove(index);
                    exhausted += 1;
                }
            }
        }

        debug!(
            "Cave growth finished with {} open cells, {} exhausted",
            opened,
            exhausted
        );
        info!(
            "Generated {}x{} cave with {} of {} cells open",
            self.width,
            self.height,
            opened,
            self.width.saturating_mul(self.height)
        );

        grid
    }
}
