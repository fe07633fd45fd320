//! Error type for the board core

use thiserror::Error;

/// Failures raised by the board, its grid and pattern placement
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    #[error("Invalid board dimensions {rows}x{cols}: both must be positive")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Row {row} has {found} cells, expected {expected} like the first row")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Coordinates ({row}, {col}) out of bounds for {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Pattern '{pattern}' anchored at ({row}, {col}) does not fit on a {rows}x{cols} board")]
    PatternOutOfBounds {
        pattern: String,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Fill density {0} must lie within [0, 1]")]
    InvalidDensity(f64),

    #[error("Unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },
}
