//! Configuration settings for the Game of Life board

use crate::game_of_life::{Pattern, StepStrategy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub simulation: SimulationConfig,
    pub seed: SeedConfig,
    pub output: OutputConfig,
}

/// Display geometry; the board gets one cell per `cell_size` pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub cell_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub generations: usize,
    pub strategy: StepStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub kind: SeedKind,
    pub pattern: Pattern,
    /// `[row, col]` anchor; the board centre when absent
    pub anchor: Option<(usize, usize)>,
    pub density: f64,
    pub rng_seed: u64,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedKind {
    Empty,
    Pattern,
    Soup,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_every: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format '{}'", other)),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                width: 1000,
                height: 1000,
                cell_size: 10,
            },
            simulation: SimulationConfig {
                generations: 100,
                strategy: StepStrategy::ActiveRegion,
            },
            seed: SeedConfig {
                kind: SeedKind::Pattern,
                pattern: Pattern::Brackets,
                anchor: None,
                density: 0.3,
                rng_seed: 42,
                file: None,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                show_every: false,
            },
        }
    }
}

impl BoardConfig {
    pub fn rows(&self) -> usize {
        self.height.checked_div(self.cell_size).unwrap_or(0)
    }

    pub fn cols(&self) -> usize {
        self.width.checked_div(self.cell_size).unwrap_or(0)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.board.cell_size == 0 {
            anyhow::bail!("Cell size must be positive");
        }

        if self.board.rows() == 0 || self.board.cols() == 0 {
            anyhow::bail!(
                "A {}x{} display with {}px cells leaves no room for a single cell",
                self.board.width,
                self.board.height,
                self.board.cell_size
            );
        }

        if !(0.0..=1.0).contains(&self.seed.density) {
            anyhow::bail!("Seed density must lie within [0, 1], got {}", self.seed.density);
        }

        if self.seed.kind == SeedKind::File {
            match &self.seed.file {
                None => anyhow::bail!("Seed kind 'file' requires a pattern file"),
                Some(file) if !file.exists() => {
                    anyhow::bail!("Pattern file does not exist: {}", file.display())
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.board.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.board.height = height;
        }
        if let Some(cell_size) = cli_overrides.cell_size {
            self.board.cell_size = cell_size;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(strategy) = cli_overrides.strategy {
            self.simulation.strategy = strategy;
        }
        if let Some(pattern) = cli_overrides.pattern {
            self.seed.kind = SeedKind::Pattern;
            self.seed.pattern = pattern;
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.seed.kind = SeedKind::File;
            self.seed.file = Some(pattern_file.clone());
        }
        if let Some(rng_seed) = cli_overrides.rng_seed {
            self.seed.kind = SeedKind::Soup;
            self.seed.rng_seed = rng_seed;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.show_every {
            self.output.show_every = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub cell_size: Option<usize>,
    pub generations: Option<usize>,
    pub strategy: Option<StepStrategy>,
    pub pattern: Option<Pattern>,
    pub pattern_file: Option<PathBuf>,
    pub rng_seed: Option<u64>,
    pub format: Option<OutputFormat>,
    pub show_every: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.board.rows(), 100);
        assert_eq!(settings.board.cols(), 100);
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.simulation.strategy = StepStrategy::FullScan;
        settings.seed.anchor = Some((3, 4));
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.simulation.strategy, StepStrategy::FullScan);
        assert_eq!(loaded.seed.anchor, Some((3, 4)));
        assert_eq!(loaded.seed.pattern, Pattern::Brackets);
    }

    #[test]
    fn test_parse_handwritten_yaml() {
        let yaml = r#"
board:
  width: 300
  height: 200
  cell_size: 20
simulation:
  generations: 12
  strategy: full_scan
seed:
  kind: soup
  pattern: glider
  anchor: null
  density: 0.25
  rng_seed: 7
  file: null
output:
  format: json
  show_every: true
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        settings.validate().unwrap();
        assert_eq!(settings.board.rows(), 10);
        assert_eq!(settings.board.cols(), 15);
        assert_eq!(settings.seed.kind, SeedKind::Soup);
        assert_eq!(settings.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.board.cell_size = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.board.width = 5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed.density = -0.1;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed.kind = SeedKind::File;
        assert!(settings.validate().is_err());
        settings.seed.file = Some(PathBuf::from("does/not/exist.txt"));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            width: Some(400),
            cell_size: Some(20),
            generations: Some(3),
            strategy: Some(StepStrategy::FullScan),
            pattern: Some(Pattern::Glider),
            show_every: true,
            ..CliOverrides::default()
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.board.cols(), 20);
        assert_eq!(settings.board.rows(), 50);
        assert_eq!(settings.simulation.generations, 3);
        assert_eq!(settings.simulation.strategy, StepStrategy::FullScan);
        assert_eq!(settings.seed.kind, SeedKind::Pattern);
        assert_eq!(settings.seed.pattern, Pattern::Glider);
        assert!(settings.output.show_every);
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
