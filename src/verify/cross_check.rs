//! Lock-step comparison of the step strategies on random soups

use crate::error::BoardError;
use crate::game_of_life::{random_soup, Board, StepStrategy};
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Parameters for a cross-check run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    pub rows: usize,
    pub cols: usize,
    /// Soup fill rate
    pub density: f64,
    /// Number of soups, seeded `first_seed`, `first_seed + 1`, ...
    pub boards: usize,
    pub generations: usize,
    pub first_seed: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            rows: 32,
            cols: 32,
            density: 0.35,
            boards: 64,
            generations: 100,
            first_seed: 0,
        }
    }
}

/// First point where the two strategies disagreed on one soup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divergence {
    pub seed: u64,
    pub generation: u64,
    pub full_scan_population: usize,
    pub active_region_population: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub boards_checked: usize,
    pub generations: usize,
    pub divergences: Vec<Divergence>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl VerificationReport {
    pub fn is_consistent(&self) -> bool {
        self.divergences.is_empty()
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Strategy Cross-Check:")?;
        writeln!(f, "  Boards checked: {}", self.boards_checked)?;
        writeln!(f, "  Generations per board: {}", self.generations)?;
        writeln!(f, "  Divergent boards: {}", self.divergences.len())?;
        for divergence in &self.divergences {
            writeln!(
                f,
                "    seed {} diverged at generation {} (full scan {} cells, active region {} cells)",
                divergence.seed,
                divergence.generation,
                divergence.full_scan_population,
                divergence.active_region_population
            )?;
        }
        write!(f, "  Time: {:.3}s", self.elapsed.as_secs_f64())
    }
}

/// Step one full-scan and one active-region board per soup and compare them
/// after every generation. Soups are spread across the rayon pool; each board
/// is still stepped on a single thread.
pub fn cross_check(config: &VerificationConfig) -> Result<VerificationReport> {
    let start_time = Instant::now();
    info!(
        boards = config.boards,
        rows = config.rows,
        cols = config.cols,
        generations = config.generations,
        "cross-checking step strategies"
    );

    let outcomes = (0..config.boards as u64)
        .into_par_iter()
        .map(|offset| check_soup(config, config.first_seed + offset))
        .collect::<Result<Vec<_>, BoardError>>()?;

    let divergences: Vec<Divergence> = outcomes.into_iter().flatten().collect();

    Ok(VerificationReport {
        boards_checked: config.boards,
        generations: config.generations,
        divergences,
        elapsed: start_time.elapsed(),
    })
}

fn check_soup(config: &VerificationConfig, seed: u64) -> Result<Option<Divergence>, BoardError> {
    let soup = random_soup(config.rows, config.cols, config.density, seed)?;
    let mut full = Board::new(config.rows, config.cols, soup.iter().copied())?
        .with_strategy(StepStrategy::FullScan);
    let mut active = Board::new(config.rows, config.cols, soup)?
        .with_strategy(StepStrategy::ActiveRegion);

    for _ in 0..config.generations {
        full.step();
        active.step();

        let agree = full.grid() == active.grid()
            && full.living_cells() == active.living_cells()
            && active.living_cells() == active.grid().living_cells();
        if !agree {
            let divergence = Divergence {
                seed,
                generation: full.generation(),
                full_scan_population: full.grid().living_count(),
                active_region_population: active.grid().living_count(),
            };
            warn!(
                seed,
                generation = divergence.generation,
                "step strategies diverged"
            );
            return Ok(Some(divergence));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategies_agree_on_soups() {
        let config = VerificationConfig {
            rows: 16,
            cols: 20,
            density: 0.4,
            boards: 12,
            generations: 40,
            first_seed: 3,
        };
        let report = cross_check(&config).unwrap();

        assert_eq!(report.boards_checked, 12);
        assert!(report.is_consistent(), "{}", report);
    }

    #[test]
    fn test_single_row_and_column_boards() {
        for (rows, cols) in [(1, 25), (25, 1), (1, 1)] {
            let config = VerificationConfig {
                rows,
                cols,
                density: 0.7,
                boards: 4,
                generations: 10,
                first_seed: 0,
            };
            assert!(cross_check(&config).unwrap().is_consistent());
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let bad_density = VerificationConfig {
            density: 2.0,
            ..VerificationConfig::default()
        };
        assert!(cross_check(&bad_density).is_err());

        let bad_size = VerificationConfig {
            rows: 0,
            boards: 2,
            ..VerificationConfig::default()
        };
        assert!(cross_check(&bad_size).is_err());
    }

    #[test]
    fn test_report_display() {
        let report = VerificationReport {
            boards_checked: 2,
            generations: 5,
            divergences: vec![Divergence {
                seed: 9,
                generation: 3,
                full_scan_population: 4,
                active_region_population: 5,
            }],
            elapsed: Duration::from_millis(20),
        };
        let text = report.to_string();
        assert!(text.contains("Divergent boards: 1"));
        assert!(text.contains("seed 9 diverged at generation 3"));
        assert!(!report.is_consistent());
    }
}
