pub mod conversion;
pub mod directions;
pub mod grid;
pub mod neighbors;
pub mod random;
pub mod shuffle;
pub mod terrain;

pub use directions::{Offset, DIAGONAL_OFFSETS, NEIGHBOR_COUNT, STRAIGHT_OFFSETS};
pub use grid::{Connectivity, Grid};
pub use neighbors::{
    FixedNeighbors, FreshNeighbors, NeighborOffsetProvider, NeighborOrder, NeighborOrdering,
    Neighbors, DEFAULT_POOL_SIZE,
};
pub use random::{RandomSource, SequenceSource};
pub use terrain::{CaveGenerator, Terrain};
