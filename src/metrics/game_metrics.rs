use std::time::{Duration, Instant};

use crate::game::StepResult;
use crate::planner::MoveSource;

/// Running totals for one run. Time only accumulates while the run is active.
pub struct RunMetrics {
    running_since: Option<Instant>,
    accumulated: Duration,
    pub elapsed_time: Duration,
    pub steps: u32,
    pub apples: u32,
    plan_moves: u32,
    shortcut_moves: u32,
    greedy_moves: u32,
    cycle_moves: u32,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            accumulated: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            steps: 0,
            apples: 0,
            plan_moves: 0,
            shortcut_moves: 0,
            greedy_moves: 0,
            cycle_moves: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.accumulated
            + self
                .running_since
                .map_or(Duration::ZERO, |since| since.elapsed());
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed();
        }
        self.update();
    }

    pub fn is_timing(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn on_reset(&mut self) {
        *self = Self::new();
    }

    pub fn record(&mut self, result: &StepResult) {
        self.steps += 1;
        if result.ate_target {
            self.apples += 1;
        }

        match result.source {
            MoveSource::PlanStep => self.plan_moves += 1,
            MoveSource::Shortcut => self.shortcut_moves += 1,
            MoveSource::Greedy => self.greedy_moves += 1,
            MoveSource::Cycle => self.cycle_moves += 1,
        }
    }

    pub fn moves_by(&self, source: MoveSource) -> u32 {
        match source {
            MoveSource::PlanStep => self.plan_moves,
            MoveSource::Shortcut => self.shortcut_moves,
            MoveSource::Greedy => self.greedy_moves,
            MoveSource::Cycle => self.cycle_moves,
        }
    }

    /// Share of moves that left the cycle, in percent
    pub fn off_cycle_ratio(&self) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }
        let off_cycle = self.steps - self.cycle_moves;
        off_cycle as f64 * 100.0 / self.steps as f64
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn result(source: MoveSource, ate_target: bool) -> StepResult {
        StepResult {
            moved: Cell::ORIGIN,
            source,
            ate_target,
            finished: false,
        }
    }

    #[test]
    fn test_time_formatting() {
        let mut metrics = RunMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_clock_stopped_until_resume() {
        let mut metrics = RunMetrics::new();
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
        assert!(!metrics.is_timing());
    }

    #[test]
    fn test_clock_frozen_while_paused() {
        let mut metrics = RunMetrics::new();
        metrics.on_resume();
        assert!(metrics.is_timing());
        metrics.on_pause();

        let frozen = metrics.elapsed_time;
        std::thread::sleep(Duration::from_millis(5));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);
    }

    #[test]
    fn test_moves_by_source() {
        let mut metrics = RunMetrics::new();
        metrics.record(&result(MoveSource::Shortcut, false));
        metrics.record(&result(MoveSource::PlanStep, true));
        metrics.record(&result(MoveSource::Cycle, false));
        metrics.record(&result(MoveSource::Cycle, true));

        assert_eq!(metrics.steps, 4);
        assert_eq!(metrics.apples, 2);
        assert_eq!(metrics.moves_by(MoveSource::Cycle), 2);
        assert_eq!(metrics.moves_by(MoveSource::Shortcut), 1);
        assert_eq!(metrics.moves_by(MoveSource::Greedy), 0);
        assert_eq!(metrics.off_cycle_ratio(), 50.0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut metrics = RunMetrics::new();
        metrics.on_resume();
        metrics.record(&result(MoveSource::Greedy, true));
        metrics.on_reset();

        assert_eq!(metrics.steps, 0);
        assert_eq!(metrics.apples, 0);
        assert!(!metrics.is_timing());
        assert_eq!(metrics.off_cycle_ratio(), 0.0);
    }
}
