//! The simulation board driven by a front end
//!
//! A [`Board`] owns two grids of the same size. The current one answers
//! queries, the other is scratch space for the next generation. Every step is
//! computed purely from the previous generation, whichever [`StepStrategy`]
//! picks the cells to evaluate.

use super::grid::{Coord, Grid};
use super::patterns::{place_offsets, Pattern};
use super::rules::GameOfLifeRules;
use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use tracing::{debug, trace};

/// How `step` chooses which cells to evaluate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStrategy {
    /// Evaluate every cell into the scratch grid, then swap
    FullScan,
    /// Evaluate only living cells and their neighbours; nothing else can change
    #[default]
    ActiveRegion,
}

impl StepStrategy {
    pub const ALL: [StepStrategy; 2] = [StepStrategy::FullScan, StepStrategy::ActiveRegion];

    pub fn name(self) -> &'static str {
        match self {
            StepStrategy::FullScan => "full_scan",
            StepStrategy::ActiveRegion => "active_region",
        }
    }
}

impl fmt::Display for StepStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StepStrategy {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        StepStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| BoardError::UnknownName {
                kind: "step strategy",
                name: s.to_string(),
            })
    }
}

/// Fixed-size Game of Life board
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    scratch: Grid,
    live: BTreeSet<Coord>,
    strategy: StepStrategy,
    generation: u64,
}

impl Board {
    /// Create a `rows x cols` board with only the `seeds` alive.
    ///
    /// Repeated seeds are harmless; a seed off the board is an error.
    pub fn new<I>(rows: usize, cols: usize, seeds: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let grid = Grid::new(rows, cols)?;
        let mut board = Self {
            scratch: grid.clone(),
            grid,
            live: BTreeSet::new(),
            strategy: StepStrategy::default(),
            generation: 0,
        };

        for (row, col) in seeds {
            board.set_alive(row, col, true)?;
        }

        debug!(rows, cols, population = board.population(), "board created");
        Ok(board)
    }

    /// Create a board that mirrors an existing grid
    pub fn from_grid(grid: Grid) -> Self {
        let live = grid.living_cells().into_iter().collect();
        Self {
            scratch: grid.clone(),
            grid,
            live,
            strategy: StepStrategy::default(),
            generation: 0,
        }
    }

    pub fn with_strategy(mut self, strategy: StepStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> StepStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: StepStrategy) {
        self.strategy = strategy;
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn is_alive(&self, row: usize, col: usize) -> Result<bool, BoardError> {
        self.grid.get(row, col)
    }

    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) -> Result<(), BoardError> {
        self.grid.set(row, col, alive)?;
        if alive {
            self.live.insert((row, col));
        } else {
            self.live.remove(&(row, col));
        }
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool, BoardError> {
        let alive = !self.is_alive(row, col)?;
        self.set_alive(row, col, alive)?;
        Ok(alive)
    }

    /// Bring a named pattern to life around `anchor`.
    ///
    /// Cells already alive stay alive. If any cell of the pattern would land
    /// off the board, nothing is changed.
    pub fn place(&mut self, pattern: Pattern, anchor: Coord) -> Result<(), BoardError> {
        self.place_offsets(pattern.name(), pattern.offsets(), anchor)
    }

    /// Same as [`Board::place`] for an arbitrary set of relative offsets
    pub fn place_offsets(
        &mut self,
        name: &str,
        offsets: &[(isize, isize)],
        anchor: Coord,
    ) -> Result<(), BoardError> {
        let (rows, cols) = self.dimensions();
        for (row, col) in place_offsets(name, offsets, anchor, rows, cols)? {
            self.set_alive(row, col, true)?;
        }
        Ok(())
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.grid.clear();
        self.live.clear();
    }

    /// Advance exactly one generation
    pub fn step(&mut self) {
        match self.strategy {
            StepStrategy::FullScan => self.step_full_scan(),
            StepStrategy::ActiveRegion => self.step_active_region(),
        }
        self.generation += 1;
        trace!(
            generation = self.generation,
            population = self.population(),
            strategy = %self.strategy,
            "stepped"
        );
    }

    /// Advance `generations` generations
    pub fn step_n(&mut self, generations: usize) {
        for _ in 0..generations {
            self.step();
        }
    }

    fn step_full_scan(&mut self) {
        GameOfLifeRules::evolve_into(&self.grid, &mut self.scratch);
        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.live = self.grid.living_cells().into_iter().collect();
    }

    fn step_active_region(&mut self) {
        let mut candidates: BTreeSet<Coord> = BTreeSet::new();
        for &(row, col) in &self.live {
            candidates.insert((row, col));
            candidates.extend(self.grid.neighbors(row, col));
        }

        // Decide every change against the untouched grid before applying any
        let changes: Vec<(Coord, bool)> = candidates
            .into_iter()
            .filter_map(|(row, col)| {
                let next = GameOfLifeRules::next_state(&self.grid, row, col);
                (next != self.live.contains(&(row, col))).then_some(((row, col), next))
            })
            .collect();

        for ((row, col), alive) in changes {
            self.grid.write(row, col, alive);
            if alive {
                self.live.insert((row, col));
            } else {
                self.live.remove(&(row, col));
            }
        }
    }

    /// Number of steps taken since the board was created
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.live.len()
    }

    /// Living cells in row-major order
    pub fn living_cells(&self) -> Vec<Coord> {
        self.live.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// 64-bit hash of the living cells.
    ///
    /// Equal states always hash alike regardless of strategy or history;
    /// different states may collide, so compare grids to confirm a match.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.dimensions().hash(&mut hasher);
        for cell in &self.live {
            cell.hash(&mut hasher);
        }
        hasher.finish()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
