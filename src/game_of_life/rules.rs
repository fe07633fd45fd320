//! Conway's Game of Life transition rule (B3/S23)

use super::Grid;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    #[inline]
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }

    /// Next state of one cell, read from the previous generation
    #[inline]
    pub fn next_state(current: &Grid, row: usize, col: usize) -> bool {
        let alive = current.alive_at(row as isize, col as isize);
        Self::should_be_alive(alive, current.count_neighbors(row, col))
    }

    /// Evaluate every cell of `current` into `next`.
    ///
    /// `next` must have the same dimensions; `current` is only read, so every
    /// cell sees the previous generation regardless of visiting order.
    pub fn evolve_into(current: &Grid, next: &mut Grid) {
        debug_assert_eq!(current.dimensions(), next.dimensions());

        for row in 0..current.rows() {
            for col in 0..current.cols() {
                next.write(row, col, Self::next_state(current, row, col));
            }
        }
    }

    /// Apply Game of Life rules to evolve the grid one generation forward
    pub fn evolve(current: &Grid) -> Grid {
        let mut next = current.clone();
        Self::evolve_into(current, &mut next);
        next
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = Self::evolve(&grid);
        }
        grid
    }

    /// Neighbor counts that would result in birth (dead -> alive)
    pub fn birth_neighbor_counts() -> Vec<u8> {
        vec![3]
    }

    /// Neighbor counts that would result in survival (alive -> alive)
    pub fn survival_neighbor_counts() -> Vec<u8> {
        vec![2, 3]
    }
}
