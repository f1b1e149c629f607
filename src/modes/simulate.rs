//! Headless mode: play seeded runs to completion and report how they went
//!
//! Each run uses its own seed (the base seed plus the run number), so a batch
//! is reproducible as a whole and individual runs can be replayed in watch
//! mode with `--seed`.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::game::{GameConfig, GameEngine, RunState};
use crate::metrics::RunMetrics;
use crate::planner::MoveSource;

/// Configuration for a batch of headless runs
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    /// Number of runs to play
    pub runs: usize,
    /// Grid and planner settings; `seed` is the base seed of the batch
    pub game_config: GameConfig,
}

impl SimulateConfig {
    pub fn new(runs: usize, game_config: GameConfig) -> Self {
        Self { runs, game_config }
    }

    fn seed_for(&self, run: usize) -> Option<u64> {
        self.game_config
            .seed
            .map(|base| base.wrapping_add(run as u64))
    }
}

/// How a single run ended
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub seed: Option<u64>,
    pub run_state: RunState,
    pub length: usize,
    pub steps: u32,
    pub apples: u32,
    pub off_cycle_percent: f64,
}

/// Aggregate over a batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationReport {
    pub outcomes: Vec<RunOutcome>,
}

impl SimulationReport {
    pub fn finished(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.run_state == RunState::Finished)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.finished()
    }

    pub fn mean_steps(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let total: u64 = self.outcomes.iter().map(|outcome| outcome.steps as u64).sum();
        total as f64 / self.outcomes.len() as f64
    }

    pub fn step_range(&self) -> Option<(u32, u32)> {
        let min = self.outcomes.iter().map(|outcome| outcome.steps).min()?;
        let max = self.outcomes.iter().map(|outcome| outcome.steps).max()?;
        Some((min, max))
    }

    pub fn format_summary(&self) -> String {
        let (min, max) = self.step_range().unwrap_or((0, 0));
        format!(
            "Finished: {}/{} | Steps: mean {:.1}, min {}, max {}",
            self.finished(),
            self.outcomes.len(),
            self.mean_steps(),
            min,
            max
        )
    }
}

/// Plays runs without a terminal
pub struct SimulateMode {
    config: SimulateConfig,
}

impl SimulateMode {
    pub fn new(config: SimulateConfig) -> Result<Self> {
        config
            .game_config
            .validate()
            .context("Invalid simulation configuration")?;
        Ok(Self { config })
    }

    pub fn run(&self) -> Result<SimulationReport> {
        self.print_header();

        let mut report = SimulationReport::default();
        for run in 0..self.config.runs {
            let outcome = self.play_one(run)?;
            println!(
                "[Run {}/{}] {:?} after {} steps, length {}, {:.1}% off-cycle",
                run + 1,
                self.config.runs,
                outcome.run_state,
                outcome.steps,
                outcome.length,
                outcome.off_cycle_percent
            );
            report.outcomes.push(outcome);
        }

        println!();
        println!("{}", report.format_summary());

        Ok(report)
    }

    /// Play one run until it finishes or an invariant breaks
    fn play_one(&self, run: usize) -> Result<RunOutcome> {
        let seed = self.config.seed_for(run);
        let config = GameConfig {
            seed,
            ..self.config.game_config.clone()
        };

        let mut engine = GameEngine::new(config).context("Failed to build engine")?;
        let mut state = engine.reset().context("Failed to place the first target")?;
        let mut metrics = RunMetrics::new();

        // Each target is reached in at most one lap of the cycle
        let total = state.total_cells() as u32;
        let step_limit = total.saturating_mul(total);

        state.start();
        metrics.on_resume();
        while state.is_running() {
            match engine.step(&mut state) {
                Ok(result) => metrics.record(&result),
                Err(err) => {
                    warn!(run, ?seed, %err, "run stopped");
                    break;
                }
            }
            if state.steps > step_limit {
                warn!(run, ?seed, steps = state.steps, "run exceeded step limit");
                state.run_state = RunState::Blocked;
            }
        }
        metrics.on_pause();

        info!(
            run,
            ?seed,
            steps = state.steps,
            cycle_moves = metrics.moves_by(MoveSource::Cycle),
            shortcut_moves =
                metrics.moves_by(MoveSource::Shortcut) + metrics.moves_by(MoveSource::PlanStep),
            greedy_moves = metrics.moves_by(MoveSource::Greedy),
            elapsed_ms = metrics.elapsed_time.as_millis() as u64,
            "run complete"
        );

        Ok(RunOutcome {
            seed,
            run_state: state.run_state,
            length: state.len(),
            steps: state.steps,
            apples: state.apples,
            off_cycle_percent: metrics.off_cycle_ratio(),
        })
    }

    fn print_header(&self) {
        let game = &self.config.game_config;
        println!("{}", "=".repeat(70));
        println!("Hamiltonian snake - headless runs");
        println!("{}", "=".repeat(70));
        println!("Runs: {}", self.config.runs);
        println!("Grid: {0}x{0}", game.grid_size);
        match game.seed {
            Some(seed) => println!("Base seed: {}", seed),
            None => println!("Base seed: random"),
        }
        println!("Greedy steps on short bodies: {}", game.greedy_short_body);
        println!("{}", "=".repeat(70));
        println!();
    }
}
