//! Builds a seeded board from settings and runs it

use crate::analysis::{observe_with, Classification, RunAnalysis};
use crate::config::{SeedKind, Settings};
use crate::game_of_life::io::{load_pattern_from_file, pattern_offsets};
use crate::game_of_life::{random_soup, Board, Coord, StepStrategy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;

/// Outcome of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub rows: usize,
    pub cols: usize,
    pub strategy: StepStrategy,
    pub seed_population: usize,
    pub final_generation: u64,
    pub analysis: RunAnalysis,
    /// Living cells of the final generation in row-major order
    pub live_cells: Vec<Coord>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl SimulationReport {
    pub fn classification(&self) -> Classification {
        self.analysis.classification
    }
}

/// Create the board described by `settings`, seeded and ready to step
pub fn build_board(settings: &Settings) -> Result<Board> {
    let rows = settings.board.rows();
    let cols = settings.board.cols();
    let seed = &settings.seed;
    let centre = (rows / 2, cols / 2);

    let board = match seed.kind {
        SeedKind::Empty => Board::new(rows, cols, [])?,
        SeedKind::Pattern => {
            let mut board = Board::new(rows, cols, [])?;
            board
                .place(seed.pattern, seed.anchor.unwrap_or(centre))
                .with_context(|| format!("Failed to seed the board with a {}", seed.pattern))?;
            board
        }
        SeedKind::Soup => {
            let cells = random_soup(rows, cols, seed.density, seed.rng_seed)?;
            Board::new(rows, cols, cells)?
        }
        SeedKind::File => {
            let path = seed
                .file
                .as_ref()
                .context("Seed kind 'file' requires a pattern file")?;
            let pattern = load_pattern_from_file(path)?;
            let anchor = seed.anchor.unwrap_or((
                rows.saturating_sub(pattern.rows()) / 2,
                cols.saturating_sub(pattern.cols()) / 2,
            ));

            let mut board = Board::new(rows, cols, [])?;
            let name = path.display().to_string();
            board
                .place_offsets(&name, &pattern_offsets(&pattern), anchor)
                .with_context(|| format!("Failed to seed the board from {}", name))?;
            board
        }
    };

    Ok(board.with_strategy(settings.simulation.strategy))
}

/// Run the configured simulation, stopping early once the board settles
pub fn run_simulation(settings: &Settings) -> Result<SimulationReport> {
    run_simulation_with(settings, |_| {})
}

/// [`run_simulation`], calling `on_step` after every generation
pub fn run_simulation_with<F>(settings: &Settings, on_step: F) -> Result<SimulationReport>
where
    F: FnMut(&Board),
{
    let start_time = Instant::now();
    let mut board = build_board(settings)?;
    let (rows, cols) = board.dimensions();
    let seed_population = board.population();

    info!(
        rows,
        cols,
        strategy = %board.strategy(),
        population = seed_population,
        generations = settings.simulation.generations,
        "starting simulation"
    );

    let analysis = observe_with(&mut board, settings.simulation.generations, on_step);

    info!(
        generation = board.generation(),
        population = board.population(),
        classification = %analysis.classification,
        "simulation finished"
    );

    Ok(SimulationReport {
        rows,
        cols,
        strategy: board.strategy(),
        seed_population,
        final_generation: board.generation(),
        analysis,
        live_cells: board.living_cells(),
        elapsed: start_time.elapsed(),
    })
}
