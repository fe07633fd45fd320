//! Population history and settling behaviour of a run

use crate::game_of_life::Board;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// How a run ended up, in absolute board generations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// Every cell dead from `generation` on
    Extinct { generation: u64 },
    /// Unchanged from `generation` on
    StillLife { generation: u64 },
    /// Repeating every `period` steps from `generation` on
    Oscillator { period: u64, generation: u64 },
    /// No repeated state within the generation budget
    Unsettled,
}

impl Classification {
    pub fn is_settled(&self) -> bool {
        !matches!(self, Classification::Unsettled)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Extinct { generation } => write!(f, "Extinct at generation {}", generation),
            Classification::StillLife { generation } => {
                write!(f, "Still life from generation {}", generation)
            }
            Classification::Oscillator { period, generation } => {
                write!(f, "Oscillator (period {}) from generation {}", period, generation)
            }
            Classification::Unsettled => write!(f, "Unsettled"),
        }
    }
}

/// Record of one observed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunAnalysis {
    /// Board generation the observation started at
    pub start_generation: u64,
    /// Steps actually taken; fewer than the budget when the run settled early
    pub generations_run: u64,
    /// Population before the first step, then after every step
    pub populations: Vec<usize>,
    pub peak_population: usize,
    pub classification: Classification,
}

impl RunAnalysis {
    pub fn final_population(&self) -> usize {
        self.populations.last().copied().unwrap_or(0)
    }
}

/// Step `board` up to `max_generations` times, stopping once it dies out or repeats
pub fn observe(board: &mut Board, max_generations: usize) -> RunAnalysis {
    observe_with(board, max_generations, |_| {})
}

/// [`observe`], calling `on_step` with the board after every step.
///
/// Past states are remembered by [`Board::fingerprint`] only. A fingerprint
/// hit is confirmed by replaying a copy of the starting board up to the
/// earlier generation, so collisions never end a run early.
pub fn observe_with<F>(board: &mut Board, max_generations: usize, mut on_step: F) -> RunAnalysis
where
    F: FnMut(&Board),
{
    let start_generation = board.generation();
    let origin = board.clone();
    let mut populations = vec![board.population()];
    let mut seen: HashMap<u64, Vec<u64>> = HashMap::new();
    let mut classification = Classification::Unsettled;

    if board.is_empty() {
        classification = Classification::Extinct {
            generation: start_generation,
        };
    } else {
        seen.insert(board.fingerprint(), vec![0]);

        for step in 1..=max_generations as u64 {
            board.step();
            on_step(board);
            populations.push(board.population());

            if board.is_empty() {
                classification = Classification::Extinct {
                    generation: board.generation(),
                };
                break;
            }

            let candidates = seen.entry(board.fingerprint()).or_default();
            let repeat = candidates
                .iter()
                .copied()
                .find(|&earlier| replay(&origin, earlier).grid() == board.grid());

            match repeat {
                Some(first) => {
                    let generation = start_generation + first;
                    classification = match step - first {
                        1 => Classification::StillLife { generation },
                        period => Classification::Oscillator { period, generation },
                    };
                    break;
                }
                None => candidates.push(step),
            }
        }
    }

    let analysis = RunAnalysis {
        start_generation,
        generations_run: board.generation() - start_generation,
        peak_population: populations.iter().copied().max().unwrap_or(0),
        populations,
        classification,
    };
    debug!(
        generations = analysis.generations_run,
        classification = %analysis.classification,
        "run observed"
    );
    analysis
}

/// `origin` advanced by `steps` generations
fn replay(origin: &Board, steps: u64) -> Board {
    let mut board = origin.clone();
    board.step_n(steps as usize);
    board
}
