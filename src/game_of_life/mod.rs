//! Game of Life core functionality

pub mod board;
pub mod grid;
pub mod io;
pub mod patterns;
pub mod rules;

pub use board::{Board, StepStrategy};
pub use grid::{Coord, Grid};
pub use io::{create_example_patterns, load_pattern_from_file, parse_pattern};
pub use patterns::{random_soup, Pattern};
pub use rules::GameOfLifeRules;
