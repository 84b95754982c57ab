use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NEIGHBOR_COUNT: usize = 8;

/// Relative step from a grid cell to one of its eight neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[isize; 2]", into = "[isize; 2]")]
pub struct Offset {
    dx: isize,
    dy: isize,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("[{dx},{dy}] is not a unit step to a neighboring cell")]
pub struct InvalidOffset {
    pub dx: isize,
    pub dy: isize,
}

impl Offset {
    // Only the eight unit steps below are ever constructed
    const fn new(dx: isize, dy: isize) -> Self {
        Self { dx, dy }
    }

    pub const fn dx(&self) -> isize {
        self.dx
    }

    pub const fn dy(&self) -> isize {
        self.dy
    }

    pub fn is_straight(&self) -> bool {
        STRAIGHT_OFFSETS.contains(self)
    }

    pub fn is_diagonal(&self) -> bool {
        DIAGONAL_OFFSETS.contains(self)
    }

    /// Returns the neighboring cell of `(x, y)` if it lies inside a
    /// `width` x `height` grid.
    pub fn apply(&self, x: usize, y: usize, width: usize, height: usize) -> Option<(usize, usize)> {
        let next_x = x.checked_add_signed(self.dx)?;
        let next_y = y.checked_add_signed(self.dy)?;
        if next_x >= width || next_y >= height {
            return None;
        }
        Some((next_x, next_y))
    }
}

impl TryFrom<[isize; 2]> for Offset {
    type Error = InvalidOffset;

    fn try_from(pair: [isize; 2]) -> Result<Self, Self::Error> {
        Offset::try_from((pair[0], pair[1]))
    }
}

impl From<Offset> for [isize; 2] {
    fn from(offset: Offset) -> Self {
        [offset.dx, offset.dy]
    }
}

impl TryFrom<(isize, isize)> for Offset {
    type Error = InvalidOffset;

    fn try_from((dx, dy): (isize, isize)) -> Result<Self, Self::Error> {
        let offset = Offset::new(dx, dy);
        if offset.is_straight() || offset.is_diagonal() {
            Ok(offset)
        } else {
            Err(InvalidOffset { dx, dy })
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.dx, self.dy)
    }
}

pub const UP: Offset = Offset::new(0, -1);
pub const LEFT: Offset = Offset::new(-1, 0);
pub const RIGHT: Offset = Offset::new(1, 0);
pub const DOWN: Offset = Offset::new(0, 1);

pub const STRAIGHT_OFFSETS: [Offset; 4] = [UP, LEFT, RIGHT, DOWN];

pub const DIAGONAL_OFFSETS: [Offset; 4] = [
    Offset::new(-1, -1), // up-left
    Offset::new(1, -1),  // up-right
    Offset::new(-1, 1),  // down-left
    Offset::new(1, 1),   // down-right
];

/// All eight offsets, straight group first, in canonical order.
pub fn canonical_neighbors() -> [Offset; NEIGHBOR_COUNT] {
    concat(&STRAIGHT_OFFSETS, &DIAGONAL_OFFSETS)
}

pub(crate) fn concat(straight: &[Offset; 4], diagonal: &[Offset; 4]) -> [Offset; NEIGHBOR_COUNT] {
    let mut all = [UP; NEIGHBOR_COUNT];
    all[..4].copy_from_slice(straight);
    all[4..].copy_from_slice(diagonal);
    all
}
