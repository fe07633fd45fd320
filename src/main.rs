//! Command line front end for the Game of Life board

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_board::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{create_example_patterns, io::pattern_grid, Pattern, StepStrategy},
    simulation::run_simulation_with,
    utils::{BoardFormatter, Status},
    verify::{cross_check, VerificationConfig},
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "life_board")]
#[command(about = "Conway's Game of Life on a fixed-size board")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a board and run it
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Display width in pixels (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Display height in pixels (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Cell size in pixels (overrides config)
        #[arg(long)]
        cell_size: Option<usize>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Step strategy: full_scan or active_region (overrides config)
        #[arg(short, long)]
        strategy: Option<StepStrategy>,

        /// Named seed pattern (overrides config)
        #[arg(short, long, conflicts_with_all = ["pattern_file", "soup"])]
        pattern: Option<Pattern>,

        /// Plaintext pattern file to seed from (overrides config)
        #[arg(long, conflicts_with = "soup")]
        pattern_file: Option<PathBuf>,

        /// Seed a random soup with this RNG seed (overrides config)
        #[arg(long)]
        soup: Option<u64>,

        /// Output format: text or json (overrides config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Print every generation, not just the last
        #[arg(long)]
        show_every: bool,
    },

    /// Check that both step strategies agree on random soups
    Verify {
        #[arg(long, default_value_t = 32)]
        rows: usize,

        #[arg(long, default_value_t = 32)]
        cols: usize,

        /// Soup fill rate
        #[arg(long, default_value_t = 0.35)]
        density: f64,

        /// Number of random boards
        #[arg(long, default_value_t = 64)]
        boards: usize,

        #[arg(short, long, default_value_t = 100)]
        generations: usize,

        /// RNG seed of the first board
        #[arg(long, default_value_t = 0)]
        first_seed: u64,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Print a named pattern
    Show {
        pattern: Pattern,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            width,
            height,
            cell_size,
            generations,
            strategy,
            pattern,
            pattern_file,
            soup,
            format,
            show_every,
        } => {
            let overrides = CliOverrides {
                width,
                height,
                cell_size,
                generations,
                strategy,
                pattern,
                pattern_file,
                rng_seed: soup,
                format,
                show_every,
            };
            run_command(config, overrides)
        }
        Commands::Verify {
            rows,
            cols,
            density,
            boards,
            generations,
            first_seed,
        } => verify_command(VerificationConfig {
            rows,
            cols,
            density,
            boards,
            generations,
            first_seed,
        }),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Show { pattern } => show_command(pattern),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        tracing::warn!(path = %config_path.display(), "config file not found, using defaults");
        Ok(Settings::default())
    }
}

fn run_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let text = settings.output.format == OutputFormat::Text;
    let show_every = text && settings.output.show_every;

    if text {
        println!(
            "{}",
            Status::Info.paint(&format!(
                "Running {}x{} board for up to {} generations",
                settings.board.rows(),
                settings.board.cols(),
                settings.simulation.generations
            ))
        );
    }

    let report = run_simulation_with(&settings, |board| {
        if show_every {
            println!("Generation {} (living: {}):", board.generation(), board.population());
            println!("{}", BoardFormatter::format_grid_compact(board.grid()));
        }
    })
    .context("Simulation failed")?;

    match settings.output.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if !show_every {
                println!("\nGeneration {}:", report.final_generation);
                println!(
                    "{}",
                    BoardFormatter::format_cells_compact(report.rows, report.cols, &report.live_cells)
                );
            }
            println!("{}", BoardFormatter::format_report(&report));
            if !report.classification().is_settled() {
                println!(
                    "{}",
                    Status::Warning.paint("Board still evolving; raise --generations to run longer")
                );
            }
        }
    }

    Ok(())
}

fn verify_command(config: VerificationConfig) -> Result<()> {
    println!(
        "{}",
        Status::Info.paint(&format!(
            "Cross-checking step strategies on {} random {}x{} boards",
            config.boards, config.rows, config.cols
        ))
    );

    let report = cross_check(&config).context("Cross-check failed")?;
    println!("{}", report);

    if report.is_consistent() {
        println!("{}", Status::Success.paint("Both strategies agree on every board"));
        Ok(())
    } else {
        println!("{}", Status::Failure.paint("Step strategies diverged"));
        anyhow::bail!("{} of {} boards diverged", report.divergences.len(), report.boards_checked)
    }
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", Status::Info.paint("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    println!("\n{}", Status::Success.paint("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: life_board run --config {}", config_path.display());

    Ok(())
}

fn show_command(pattern: Pattern) -> Result<()> {
    let grid = pattern_grid(pattern)?;
    println!("{} ({} cells):", pattern, grid.living_count());
    println!("{}", BoardFormatter::format_grid_with_coords(&grid));
    Ok(())
}
