//! Dense grid storage for Game of Life boards

use crate::error::BoardError;
use itertools::iproduct;
use std::fmt;

/// A `(row, col)` position on a grid
pub type Coord = (usize, usize);

/// Fixed-size grid of alive/dead cells stored row-major.
///
/// Every coordinate in `[0, rows) x [0, cols)` has exactly one cell and nothing
/// exists outside that range. Neighbour lookups never wrap around the edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        let len = match rows.checked_mul(cols) {
            Some(len) if rows > 0 && cols > 0 => len,
            _ => return Err(BoardError::InvalidDimensions { rows, cols }),
        };

        Ok(Self {
            rows,
            cols,
            cells: vec![false; len],
        })
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self, BoardError> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        let mut grid = Self::new(rows, cols)?;

        for (row, line) in cells.into_iter().enumerate() {
            if line.len() != cols {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            for (col, alive) in line.into_iter().enumerate() {
                grid.set(row, col, alive)?;
            }
        }

        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        if self.contains(row, col) {
            Ok(self.index(row, col))
        } else {
            Err(BoardError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Get cell value at coordinates
    pub fn get(&self, row: usize, col: usize) -> Result<bool, BoardError> {
        self.checked_index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<(), BoardError> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Write a cell the caller has already bounds-checked
    #[inline]
    pub(crate) fn write(&mut self, row: usize, col: usize, value: bool) {
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }

    /// Value of an in-bounds cell; positions off the grid read as dead
    #[inline]
    pub(crate) fn alive_at(&self, row: isize, col: isize) -> bool {
        row >= 0
            && col >= 0
            && self.contains(row as usize, col as usize)
            && self.cells[self.index(row as usize, col as usize)]
    }

    /// In-bounds Moore neighbours of a cell, the cell itself excluded
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = Coord> + '_ {
        iproduct!(-1isize..=1, -1isize..=1)
            .filter(|&offset| offset != (0, 0))
            .filter_map(move |(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                self.contains(r, c).then_some((r, c))
            })
    }

    /// Count living neighbours for a cell
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        let (row, col) = (row as isize, col as isize);
        iproduct!(-1isize..=1, -1isize..=1)
            .filter(|&offset| offset != (0, 0))
            .filter(|&(dr, dc)| self.alive_at(row + dr, col + dc))
            .count() as u8
    }

    /// Rows of the grid as slices, top to bottom
    pub fn row_slices(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.cols)
    }

    /// Get all living cell coordinates in row-major order
    pub fn living_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| (idx / self.cols, idx % self.cols))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_slices() {
            for &cell in row {
                let symbol = if cell { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.dimensions(), (3, 4));
        assert_eq!(grid.living_count(), 0);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(BoardError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert!(Grid::new(5, 0).is_err());
        assert!(Grid::new(usize::MAX, 2).is_err());
        assert!(Grid::from_cells(vec![]).is_err());
    }

    #[test]
    fn test_grid_from_cells() {
        let cells = vec![
            vec![true, false, true],
            vec![false, true, false],
            vec![true, false, true],
        ];
        let grid = Grid::from_cells(cells).unwrap();
        assert_eq!(grid.dimensions(), (3, 3));
        assert_eq!(grid.living_count(), 5);
        assert_eq!(grid.living_cells(), vec![(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let cells = vec![vec![true, false], vec![true, true], vec![true]];
        assert_eq!(
            Grid::from_cells(cells),
            Err(BoardError::RaggedRow { row: 2, expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = Grid::new(2, 3).unwrap();
        let expected = BoardError::OutOfBounds { row: 2, col: 0, rows: 2, cols: 3 };
        assert_eq!(grid.get(2, 0), Err(expected.clone()));
        assert_eq!(grid.set(2, 0, true), Err(expected));
        assert!(grid.get(0, 3).is_err());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_neighbor_counting() {
        let cells = vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ];
        let grid = Grid::from_cells(cells).unwrap();

        // Center cell should have 8 neighbors
        assert_eq!(grid.count_neighbors(1, 1), 8);

        // Corner cell only sees its edge neighbours; the centre is dead
        assert_eq!(grid.count_neighbors(0, 0), 2);
        assert_eq!(grid.count_neighbors(0, 1), 4);
    }

    #[test]
    fn test_edges_do_not_wrap() {
        let cells = vec![
            vec![true, false, true],
            vec![false, false, false],
            vec![true, false, true],
        ];
        let grid = Grid::from_cells(cells).unwrap();
        assert_eq!(grid.count_neighbors(0, 0), 0);
        assert_eq!(grid.count_neighbors(1, 1), 4);
    }

    #[test]
    fn test_neighbors_listing() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.neighbors(0, 0).count(), 3);
        assert_eq!(grid.neighbors(0, 1).count(), 5);
        assert_eq!(grid.neighbors(1, 1).count(), 8);
        assert!(grid.neighbors(2, 2).all(|(r, c)| r <= 2 && c <= 2));

        let single = Grid::new(1, 1).unwrap();
        assert_eq!(single.neighbors(0, 0).count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::from_cells(vec![vec![true, true], vec![false, true]]).unwrap();
        grid.clear();
        assert!(grid.is_empty());
    }
}
