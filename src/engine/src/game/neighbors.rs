use std::num::NonZeroUsize;
use std::str::FromStr;

use tracing::debug;

use super::directions::{self, Offset, DIAGONAL_OFFSETS, NEIGHBOR_COUNT, STRAIGHT_OFFSETS};
use super::random::RandomSource;
use super::shuffle::shuffle_copy;

pub const DEFAULT_POOL_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(size) => size,
    None => unreachable!(),
};

/// Something that hands out an ordering of the eight neighbor offsets.
///
/// Every ordering lists the four straight offsets first and the four
/// diagonal offsets last, so four-connected scans can take `[..4]`.
pub trait NeighborOrder {
    fn random_neighbors<R: RandomSource + ?Sized>(&self, rng: &mut R) -> [Offset; NEIGHBOR_COUNT];
}

/// Fixed pool of shuffled neighbor orderings, built once and read thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborOffsetProvider {
    pool: Vec<[Offset; NEIGHBOR_COUNT]>,
}

impl NeighborOffsetProvider {
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self::with_pool_size(DEFAULT_POOL_SIZE, rng)
    }

    pub fn with_pool_size<R: RandomSource + ?Sized>(size: NonZeroUsize, rng: &mut R) -> Self {
        let pool: Vec<_> = (0..size.get()).map(|_| shuffled_neighbors(rng)).collect();
        debug!("Built neighbor offset pool with {} orderings", pool.len());
        Self { pool }
    }

    pub fn pool(&self) -> &[[Offset; NEIGHBOR_COUNT]] {
        &self.pool
    }
}

impl NeighborOrder for NeighborOffsetProvider {
    fn random_neighbors<R: RandomSource + ?Sized>(&self, rng: &mut R) -> [Offset; NEIGHBOR_COUNT] {
        self.pool[rng.next_index(self.pool.len())]
    }
}

/// Shuffles on every call instead of drawing from a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreshNeighbors;

impl NeighborOrder for FreshNeighbors {
    fn random_neighbors<R: RandomSource + ?Sized>(&self, rng: &mut R) -> [Offset; NEIGHBOR_COUNT] {
        shuffled_neighbors(rng)
    }
}

/// Always returns the canonical order and never touches the random source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedNeighbors;

impl NeighborOrder for FixedNeighbors {
    fn random_neighbors<R: RandomSource + ?Sized>(&self, _rng: &mut R) -> [Offset; NEIGHBOR_COUNT] {
        directions::canonical_neighbors()
    }
}

fn shuffled_neighbors<R: RandomSource + ?Sized>(rng: &mut R) -> [Offset; NEIGHBOR_COUNT] {
    let straight = shuffle_copy(&STRAIGHT_OFFSETS, rng);
    let diagonal = shuffle_copy(&DIAGONAL_OFFSETS, rng);
    directions::concat(&straight, &diagonal)
}

/// Which neighbor ordering strategy to build at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NeighborOrdering {
    #[default]
    Pool,
    Fresh,
    Fixed,
}

impl NeighborOrdering {
    pub fn build<R>(self, pool_size: NonZeroUsize, rng: &mut R) -> Neighbors
    where
        R: RandomSource + ?Sized,
    {
        match self {
            NeighborOrdering::Pool => {
                Neighbors::Pool(NeighborOffsetProvider::with_pool_size(pool_size, rng))
            }
            NeighborOrdering::Fresh => Neighbors::Fresh(FreshNeighbors),
            NeighborOrdering::Fixed => Neighbors::Fixed(FixedNeighbors),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NeighborOrdering::Pool => "pool",
            NeighborOrdering::Fresh => "fresh",
            NeighborOrdering::Fixed => "fixed",
        }
    }
}

impl FromStr for NeighborOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pool" => Ok(NeighborOrdering::Pool),
            "fresh" => Ok(NeighborOrdering::Fresh),
            "fixed" => Ok(NeighborOrdering::Fixed),
            other => Err(format!("unknown neighbor ordering '{}'", other)),
        }
    }
}

/// A built ordering strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Neighbors {
    Pool(NeighborOffsetProvider),
    Fresh(FreshNeighbors),
    Fixed(FixedNeighbors),
}

impl NeighborOrder for Neighbors {
    fn random_neighbors<R: RandomSource + ?Sized>(&self, rng: &mut R) -> [Offset; NEIGHBOR_COUNT] {
        match self {
            Neighbors::Pool(provider) => provider.random_neighbors(rng),
            Neighbors::Fresh(fresh) => fresh.random_neighbors(rng),
            Neighbors::Fixed(fixed) => fixed.random_neighbors(rng),
        }
    }
}
