use core::fmt;
use std::collections::{HashMap, HashSet, VecDeque};

use super::directions::Offset;
use super::neighbors::NeighborOrder;
use super::random::RandomSource;

/// How many of the neighbor offsets a scan uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Straight neighbors only.
    Four,
    /// Straight and diagonal neighbors.
    Eight,
}

impl Connectivity {
    pub fn count(&self) -> usize {
        match self {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }
}

/// Row-major rectangular grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`. Callers taking sizes
    /// from outside should bound them first, as `EngineConfig` does.
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        let len = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("grid of {}x{} cells overflows usize", width, height));
        Self {
            width,
            height,
            cells: vec![fill; len],
        }
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.cells.get_mut(y * self.width + x)
    }

    /// Writes `value` at `(x, y)`; out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if let Some(cell) = self.get_mut(x, y) {
            *cell = value;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks(0) panics, and an empty grid has no rows anyway
        self.cells.chunks(self.width.max(1))
    }

    pub fn count_where<F: Fn(&T) -> bool>(&self, predicate: F) -> usize {
        self.cells.iter().filter(|cell| predicate(cell)).count()
    }

    /// In-bounds neighbors of `(x, y)` in the order the provider hands out.
    pub fn neighbors<N, R>(
        &self,
        x: usize,
        y: usize,
        connectivity: Connectivity,
        order: &N,
        rng: &mut R,
    ) -> Vec<(usize, usize)>
    where
        N: NeighborOrder + ?Sized,
        R: RandomSource + ?Sized,
    {
        let offsets = order.random_neighbors(rng);
        self.step_all(x, y, &offsets[..connectivity.count()])
    }

    fn step_all(&self, x: usize, y: usize, offsets: &[Offset]) -> Vec<(usize, usize)> {
        offsets
            .iter()
            .filter_map(|offset| offset.apply(x, y, self.width, self.height))
            .collect()
    }

    /// Cells reachable from `start` through passable cells, in visit order.
    pub fn flood_fill<N, R, F>(
        &self,
        start: (usize, usize),
        connectivity: Connectivity,
        order: &N,
        rng: &mut R,
        passable: F,
    ) -> Vec<(usize, usize)>
    where
        N: NeighborOrder + ?Sized,
        R: RandomSource + ?Sized,
        F: Fn(&T) -> bool,
    {
        let mut visited_order = vec![];
        if !self.is_passable(start, &passable) {
            return visited_order;
        }

        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(start);
        queue.push_back(start);

        while let Some((x, y)) = queue.pop_front() {
            visited_order.push((x, y));
            for next in self.neighbors(x, y, connectivity, order, rng) {
                if !seen.contains(&next) && self.is_passable(next, &passable) {
                    seen.insert(next);
                    queue.push_back(next);
                }
            }
        }

        visited_order
    }

    /// Shortest path from `start` to `goal`, both included, or `None` when
    /// the goal cannot be reached. Ties between equally short paths are
    /// broken by the neighbor order.
    pub fn find_path<N, R, F>(
        &self,
        start: (usize, usize),
        goal: (usize, usize),
        connectivity: Connectivity,
        order: &N,
        rng: &mut R,
        passable: F,
    ) -> Option<Vec<(usize, usize)>>
    where
        N: NeighborOrder + ?Sized,
        R: RandomSource + ?Sized,
        F: Fn(&T) -> bool,
    {
        if !self.is_passable(start, &passable) || !self.is_passable(goal, &passable) {
            return None;
        }

        let mut came_from: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);
        came_from.insert(start, start);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                return Some(Self::rebuild_path(&came_from, start, goal));
            }
            for next in self.neighbors(current.0, current.1, connectivity, order, rng) {
                if !came_from.contains_key(&next) && self.is_passable(next, &passable) {
                    came_from.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        None
    }

    fn rebuild_path(
        came_from: &HashMap<(usize, usize), (usize, usize)>,
        start: (usize, usize),
        goal: (usize, usize),
    ) -> Vec<(usize, usize)> {
        let mut path = VecDeque::new();
        let mut current = goal;
        path.push_front(current);
        while current != start {
            current = came_from[&current];
            path.push_front(current);
        }
        path.into()
    }

    fn is_passable<F: Fn(&T) -> bool>(&self, (x, y): (usize, usize), passable: &F) -> bool {
        self.get(x, y).map(passable).unwrap_or(false)
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
