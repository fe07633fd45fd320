//! Display and output formatting utilities

use crate::analysis::Classification;
use crate::game_of_life::{Coord, Grid};
use crate::simulation::SimulationReport;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Format boards and reports for the terminal
pub struct BoardFormatter;

impl BoardFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.rows() * (grid.cols() + 1));
        for row in grid.row_slices() {
            output.extend(row.iter().map(|&cell| if cell { '█' } else { '·' }));
            output.push('\n');
        }
        output
    }

    /// Compact form of a `rows x cols` board given only its living cells in row-major order
    pub fn format_cells_compact(rows: usize, cols: usize, live: &[Coord]) -> String {
        let mut output = String::with_capacity(rows * (cols + 1));
        let mut live = live.iter().peekable();
        for row in 0..rows {
            for col in 0..cols {
                let alive = live.next_if(|&&cell| cell == (row, col)).is_some();
                output.push(if alive { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.cols() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for (y, row) in grid.row_slices().enumerate() {
            output.push_str(&format!("{:2} ", y % 100));
            for &cell in row {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line population graph at most `width` characters wide.
    ///
    /// Longer histories are bucketed, each bucket showing its peak.
    pub fn format_population_sparkline(populations: &[usize], width: usize) -> String {
        if populations.is_empty() || width == 0 {
            return String::new();
        }

        let bucket = populations.len().div_ceil(width);
        let peaks: Vec<usize> = populations
            .chunks(bucket)
            .map(|chunk| chunk.iter().copied().max().unwrap_or(0))
            .collect();
        let top = peaks.iter().copied().max().unwrap_or(0);

        peaks
            .into_iter()
            .map(|peak| {
                if top == 0 {
                    SPARK_LEVELS[0]
                } else {
                    SPARK_LEVELS[peak * (SPARK_LEVELS.len() - 1) / top]
                }
            })
            .collect()
    }

    /// Summary block for a finished run
    pub fn format_report(report: &SimulationReport) -> String {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&format!("Board: {}x{} ({})\n", report.rows, report.cols, report.strategy));
        output.push_str(&format!("Generations run: {}\n", analysis.generations_run));
        output.push_str(&format!(
            "Living cells: {} → {} (peak {})\n",
            report.seed_population,
            analysis.final_population(),
            analysis.peak_population
        ));
        let outcome = format!("Outcome: {}", analysis.classification);
        output.push_str(&Status::for_outcome(&analysis.classification).paint(&outcome));
        output.push('\n');
        output.push_str(&format!(
            "Population: {}\n",
            Self::format_population_sparkline(&analysis.populations, 60)
        ));
        output.push_str(&format!("Time: {:.3}s\n", report.elapsed.as_secs_f64()));

        output
    }
}

/// Tone of a status line printed by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Success,
    Warning,
    Failure,
}

impl Status {
    /// Tone matching how a run ended: lasting patterns succeed, dead boards fail
    pub fn for_outcome(classification: &Classification) -> Self {
        match classification {
            Classification::StillLife { .. } | Classification::Oscillator { .. } => Status::Success,
            Classification::Unsettled => Status::Warning,
            Classification::Extinct { .. } => Status::Failure,
        }
    }

    /// `text` wrapped in this tone's ANSI colour, unless `NO_COLOR` is set or the terminal is dumb
    pub fn paint(self, text: &str) -> String {
        let enabled =
            std::env::var_os("NO_COLOR").is_none() && std::env::var("TERM").map_or(true, |t| t != "dumb");
        self.paint_if(text, enabled)
    }

    fn paint_if(self, text: &str, enabled: bool) -> String {
        if !enabled {
            return text.to_string();
        }
        let code = match self {
            Status::Info => 34,
            Status::Success => 32,
            Status::Warning => 33,
            Status::Failure => 31,
        };
        format!("\x1b[{}m{}\x1b[0m", code, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_formatting() {
        let cells = vec![
            vec![true, false, true],
            vec![false, true, false],
            vec![true, false, true],
        ];
        let grid = Grid::from_cells(cells).unwrap();

        let compact = BoardFormatter::format_grid_compact(&grid);
        assert_eq!(compact, "█·█\n·█·\n█·█\n");

        let with_coords = BoardFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(BoardFormatter::format_population_sparkline(&[], 10), "");
        assert_eq!(BoardFormatter::format_population_sparkline(&[0, 0], 10), "▁▁");
        assert_eq!(BoardFormatter::format_population_sparkline(&[0, 7, 14], 10), "▁▄█");

        let long: Vec<usize> = (0..100).collect();
        let line = BoardFormatter::format_population_sparkline(&long, 10);
        assert_eq!(line.chars().count(), 10);
        assert!(line.ends_with('█'));
    }

    #[test]
    fn test_cells_render_like_grid() {
        let grid = Grid::from_cells(vec![
            vec![false, true, true, false],
            vec![true, false, false, false],
            vec![false, false, false, true],
        ])
        .unwrap();

        let from_cells = BoardFormatter::format_cells_compact(3, 4, &grid.living_cells());
        assert_eq!(from_cells, BoardFormatter::format_grid_compact(&grid));
        assert_eq!(BoardFormatter::format_cells_compact(2, 2, &[]), "··\n··\n");
    }

    #[test]
    fn test_status_follows_outcome() {
        let still = Classification::StillLife { generation: 3 };
        let blinker = Classification::Oscillator { period: 2, generation: 0 };
        let dead = Classification::Extinct { generation: 7 };

        assert_eq!(Status::for_outcome(&still), Status::Success);
        assert_eq!(Status::for_outcome(&blinker), Status::Success);
        assert_eq!(Status::for_outcome(&dead), Status::Failure);
        assert_eq!(Status::for_outcome(&Classification::Unsettled), Status::Warning);

        assert_eq!(Status::Failure.paint_if("dead", true), "\x1b[31mdead\x1b[0m");
        assert_eq!(Status::Success.paint_if("ok", false), "ok");
        assert!(Status::Info.paint("note").contains("note"));
    }
}
