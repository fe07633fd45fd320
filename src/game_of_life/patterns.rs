//! Named seed patterns and random soups

use super::grid::Coord;
use crate::error::BoardError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patterns that can be stamped onto a board around an anchor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// Two facing bracket shapes; the classic starting seed
    Brackets,
    Glider,
    Blinker,
    Block,
    Beacon,
}

const BRACKETS: &[(isize, isize)] = &[
    (-1, -3), (-1, -2), (-1, -1), (-1, 1), (-1, 2), (-1, 3),
    (0, -3), (0, 3),
    (1, -3), (1, -2), (1, -1), (1, 1), (1, 2), (1, 3),
];

// Heading down and to the right
const GLIDER: &[(isize, isize)] = &[(1, -1), (1, 0), (1, 1), (0, 1), (-1, 0)];

const BLINKER: &[(isize, isize)] = &[(0, -1), (0, 0), (0, 1)];

const BLOCK: &[(isize, isize)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];

const BEACON: &[(isize, isize)] = &[
    (0, 0), (0, 1), (1, 0), (1, 1),
    (2, 2), (2, 3), (3, 2), (3, 3),
];

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Brackets,
        Pattern::Glider,
        Pattern::Blinker,
        Pattern::Block,
        Pattern::Beacon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Brackets => "brackets",
            Pattern::Glider => "glider",
            Pattern::Blinker => "blinker",
            Pattern::Block => "block",
            Pattern::Beacon => "beacon",
        }
    }

    /// Cell offsets relative to the anchor, as `(row, col)` deltas
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Pattern::Brackets => BRACKETS,
            Pattern::Glider => GLIDER,
            Pattern::Blinker => BLINKER,
            Pattern::Block => BLOCK,
            Pattern::Beacon => BEACON,
        }
    }

    /// Absolute cells of the pattern anchored at `anchor` on a `rows x cols` board
    pub fn cells_at(self, anchor: Coord, rows: usize, cols: usize) -> Result<Vec<Coord>, BoardError> {
        place_offsets(self.name(), self.offsets(), anchor, rows, cols)
    }

    /// Inclusive `(min_row, min_col, max_row, max_col)` of the offsets
    pub fn extent(self) -> (isize, isize, isize, isize) {
        offsets_extent(self.offsets())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::ALL
            .into_iter()
            .find(|pattern| pattern.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BoardError::UnknownName {
                kind: "pattern",
                name: s.to_string(),
            })
    }
}

/// Translate relative offsets to board coordinates.
///
/// Fails without producing anything if a single cell lands off the board.
pub fn place_offsets(
    name: &str,
    offsets: &[(isize, isize)],
    anchor: Coord,
    rows: usize,
    cols: usize,
) -> Result<Vec<Coord>, BoardError> {
    let (row, col) = anchor;
    let out_of_bounds = || BoardError::PatternOutOfBounds {
        pattern: name.to_string(),
        row,
        col,
        rows,
        cols,
    };

    offsets
        .iter()
        .map(|&(dr, dc)| {
            let r = row.checked_add_signed(dr).filter(|&r| r < rows);
            let c = col.checked_add_signed(dc).filter(|&c| c < cols);
            r.zip(c).ok_or_else(out_of_bounds)
        })
        .collect()
}

/// Inclusive bounding box of a set of offsets; `(0, 0, 0, 0)` when empty
pub fn offsets_extent(offsets: &[(isize, isize)]) -> (isize, isize, isize, isize) {
    if offsets.is_empty() {
        return (0, 0, 0, 0);
    }
    offsets.iter().fold(
        (isize::MAX, isize::MAX, isize::MIN, isize::MIN),
        |(min_r, min_c, max_r, max_c), &(r, c)| (min_r.min(r), min_c.min(c), max_r.max(r), max_c.max(c)),
    )
}

/// Random soup: every cell alive with probability `density`, reproducible from `seed`
pub fn random_soup(rows: usize, cols: usize, density: f64, seed: u64) -> Result<Vec<Coord>, BoardError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(BoardError::InvalidDensity(density));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cells = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if rng.gen_bool(density) {
                cells.push((row, col));
            }
        }
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glider_cells() {
        let cells = Pattern::Glider.cells_at((5, 5), 10, 10).unwrap();
        assert_eq!(cells, vec![(6, 4), (6, 5), (6, 6), (5, 6), (4, 5)]);
    }

    #[test]
    fn test_brackets_shape() {
        let cells = Pattern::Brackets.cells_at((5, 10), 11, 21).unwrap();
        assert_eq!(cells.len(), 14);
        assert!(cells.contains(&(5, 7)));
        assert!(cells.contains(&(5, 13)));
        assert!(!cells.contains(&(5, 10)));
        assert!(!cells.contains(&(4, 10)));
        assert_eq!(Pattern::Brackets.extent(), (-1, -3, 1, 3));
    }

    #[test]
    fn test_placement_off_board_fails() {
        let err = Pattern::Glider.cells_at((0, 0), 10, 10).unwrap_err();
        assert!(matches!(err, BoardError::PatternOutOfBounds { row: 0, col: 0, .. }));

        assert!(Pattern::Block.cells_at((9, 9), 10, 10).is_err());
        assert!(Pattern::Block.cells_at((8, 8), 10, 10).is_ok());
    }

    #[test]
    fn test_pattern_names() {
        for pattern in Pattern::ALL {
            assert_eq!(pattern.name().parse::<Pattern>().unwrap(), pattern);
        }
        assert_eq!("Glider".parse::<Pattern>().unwrap(), Pattern::Glider);
        assert!(matches!(
            "spaceship".parse::<Pattern>(),
            Err(BoardError::UnknownName { kind: "pattern", .. })
        ));
    }

    #[test]
    fn test_random_soup_is_reproducible() {
        let a = random_soup(16, 16, 0.4, 7).unwrap();
        let b = random_soup(16, 16, 0.4, 7).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|&(r, c)| r < 16 && c < 16));
    }

    #[test]
    fn test_random_soup_density_bounds() {
        assert!(random_soup(4, 4, 0.0, 1).unwrap().is_empty());
        assert_eq!(random_soup(4, 4, 1.0, 1).unwrap().len(), 16);
        assert_eq!(random_soup(4, 4, 1.5, 1), Err(BoardError::InvalidDensity(1.5)));
        assert!(random_soup(4, 4, f64::NAN, 1).is_err());
    }
}
