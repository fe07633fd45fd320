//! Plaintext pattern files used to seed boards
//!
//! One line per row. `1`, `O` and `*` mark living cells, `0` and `.` dead ones.
//! Lines starting with `!` are comments. Short rows are padded with dead cells.

use super::patterns::Pattern;
use super::Grid;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Load a pattern from a text file
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let loaded = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read pattern file: {}", path.display()))
        .and_then(|content| {
            parse_pattern(&content)
                .with_context(|| format!("Failed to parse pattern from file: {}", path.display()))
        });

    match loaded {
        Ok(grid) => {
            debug!(path = %path.display(), population = grid.living_count(), "pattern loaded");
            Ok(grid)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %format!("{:#}", err), "unreadable pattern file");
            Err(err)
        }
    }
}

/// Parse a pattern from its plaintext representation
pub fn parse_pattern(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.starts_with('!'))
        .collect();

    // Blank lines inside a pattern are empty rows; only trim them at the ends
    let first = lines.iter().position(|line| !line.trim().is_empty());
    let last = lines.iter().rposition(|line| !line.trim().is_empty());
    let lines = match (first, last) {
        (Some(first), Some(last)) => &lines[first..=last],
        _ => anyhow::bail!("Pattern is empty or contains no valid rows"),
    };

    let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let mut cells = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(width);
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' | '.' | ' ' => row.push(false),
                '1' | 'O' | '*' => row.push(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Expected one of 0 . 1 O *",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
        row.resize(width, false);
        cells.push(row);
    }

    Ok(Grid::from_cells(cells)?)
}

/// Convert a grid to its plaintext representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.rows() * (grid.cols() + 1));

    for row in grid.row_slices() {
        result.extend(row.iter().map(|&cell| if cell { '1' } else { '0' }));
        result.push('\n');
    }

    result
}

/// Living cells of a pattern grid as offsets from its top-left corner
pub fn pattern_offsets(grid: &Grid) -> Vec<(isize, isize)> {
    grid.living_cells()
        .into_iter()
        .map(|(row, col)| (row as isize, col as isize))
        .collect()
}

/// Smallest grid holding a named pattern, with one dead cell of margin
pub fn pattern_grid(pattern: Pattern) -> Result<Grid> {
    let (min_r, min_c, max_r, max_c) = pattern.extent();
    let rows = (max_r - min_r + 3) as usize;
    let cols = (max_c - min_c + 3) as usize;
    let anchor = ((1 - min_r) as usize, (1 - min_c) as usize);

    let mut grid = Grid::new(rows, cols)?;
    for (row, col) in pattern.cells_at(anchor, rows, cols)? {
        grid.set(row, col, true)?;
    }
    Ok(grid)
}

/// Write every named pattern into `output_dir` as `<name>.txt`
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for pattern in Pattern::ALL {
        let grid = pattern_grid(pattern)?;
        let content = format!("!Name: {}\n{}", pattern, grid_to_string(&grid));
        let path = dir.join(format!("{}.txt", pattern));
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
