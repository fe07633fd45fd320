//! Configuration management for the Game of Life board

pub mod settings;

pub use settings::{
    BoardConfig, CliOverrides, OutputConfig, OutputFormat, SeedConfig, SeedKind, Settings,
    SimulationConfig,
};
