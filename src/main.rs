use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use hamilton_snake::game::GameConfig;
use hamilton_snake::modes::{SimulateConfig, SimulateMode, WatchMode};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hamilton_snake")]
#[command(version, about = "Snake autopilot that fills the grid along a Hamiltonian cycle")]
struct Cli {
    /// Run mode
    #[arg(long, default_value = "watch")]
    mode: Mode,

    /// Grid side length (even)
    #[arg(long)]
    size: Option<usize>,

    /// Milliseconds between ticks in watch mode
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for target placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of runs in simulate mode
    #[arg(long, default_value = "10")]
    runs: usize,

    /// JSON config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (watch mode logs nothing without it)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Watch the autopilot in the terminal
    Watch,
    /// Play seeded runs headlessly and print a summary
    Simulate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.mode, cli.log_file.as_deref())?;

    let config = resolve_config(&cli)?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(config)?;
            watch_mode.run().await?;
        }
        Mode::Simulate => {
            let simulate_mode = SimulateMode::new(SimulateConfig::new(cli.runs, config))?;
            let report = simulate_mode.run()?;
            if report.failed() > 0 {
                bail!("{} of {} runs did not fill the grid", report.failed(), cli.runs);
            }
        }
    }

    Ok(())
}

/// Config file (or defaults) with command line flags on top
fn resolve_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(size) = cli.size {
        config.grid_size = size;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// The TUI owns the terminal, so watch mode only logs to a file
fn init_tracing(mode: &Mode, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (log_file, mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        (None, Mode::Simulate) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
        (None, Mode::Watch) => {}
    }

    Ok(())
}
