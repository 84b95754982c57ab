#[cfg(test)]
pub mod test_utils {
    use crate::game::Grid;
    use rand::{rngs::StdRng, SeedableRng};

    /// Seeded RNG so randomized tests stay reproducible
    pub fn seeded_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    /// Builds a character grid from equal-length rows, e.g. `["..#", "#.."]`.
    /// Row index is `y`, column index is `x`.
    pub fn grid_from_rows(rows: &[&str]) -> Grid<char> {
        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let mut grid = Grid::new(width, height, '#');

        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), width, "rows must have equal length");
            for (x, cell) in row.chars().enumerate() {
                grid.set(x, y, cell);
            }
        }

        grid
    }
}
