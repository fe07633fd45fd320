//! Seeding and running configured simulations

pub mod runner;

pub use runner::{build_board, run_simulation, run_simulation_with, SimulationReport};
