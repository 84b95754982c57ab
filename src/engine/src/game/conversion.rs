use crate::game::directions::{Offset, NEIGHBOR_COUNT};
use crate::game::grid::Grid;
use crate::game::terrain::Terrain;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableMap {
    pub seed: String,
    pub width: usize,
    pub height: usize,
    pub rows: Vec<String>,
}

impl SerializableMap {
    pub fn new(seed: &str, grid: &Grid<Terrain>) -> Self {
        Self {
            seed: seed.to_string(),
            width: grid.width(),
            height: grid.height(),
            rows: grid
                .rows()
                .map(|row| row.iter().map(Terrain::symbol).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializablePool {
    pub orderings: Vec<Vec<Offset>>,
}

impl From<&[[Offset; NEIGHBOR_COUNT]]> for SerializablePool {
    fn from(pool: &[[Offset; NEIGHBOR_COUNT]]) -> Self {
        Self {
            orderings: pool.iter().map(|ordering| ordering.to_vec()).collect(),
        }
    }
}
