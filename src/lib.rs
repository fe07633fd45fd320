//! Game of Life board
//!
//! A fixed-size Conway's Game of Life board for a front end to query, paint
//! and step, plus the configuration, seeding and run analysis around it.

pub mod analysis;
pub mod config;
pub mod error;
pub mod game_of_life;
pub mod simulation;
pub mod utils;
pub mod verify;

pub use config::Settings;
pub use error::BoardError;
pub use game_of_life::{Board, Coord, Grid, Pattern, StepStrategy};
pub use simulation::{run_simulation, SimulationReport};
