use std::sync::Arc;

use tracing::{debug, error, trace};

use super::{
    config::{validate_grid_size, GameConfig},
    error::NavError,
    state::{initialize, AgentState, Cell, RunState},
    target::{RandomTargets, TargetSource},
};
use crate::planner::{safety::advance_body, MoveArbiter, MoveSource, OccupancyGrid, Tour};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Cell the head moved into
    pub moved: Cell,
    /// Strategy that picked the move
    pub source: MoveSource,
    /// Whether the head landed on the target this tick
    pub ate_target: bool,
    /// Whether the body now covers the whole grid
    pub finished: bool,
}

/// Drives an `AgentState` one tick at a time
pub struct GameEngine<T: TargetSource = RandomTargets> {
    config: GameConfig,
    tour: Arc<Tour>,
    arbiter: MoveArbiter,
    targets: T,
}

impl GameEngine<RandomTargets> {
    /// Create an engine that places targets at random, seeded from the config
    pub fn new(config: GameConfig) -> Result<Self, NavError> {
        let targets = RandomTargets::from_seed(config.seed);
        Self::with_targets(config, targets)
    }
}

impl<T: TargetSource> GameEngine<T> {
    pub fn with_targets(config: GameConfig, targets: T) -> Result<Self, NavError> {
        config.validate()?;
        let tour = Arc::new(Tour::new(config.grid_size)?);
        let arbiter = MoveArbiter::new(config.greedy_short_body);

        Ok(Self {
            config,
            tour,
            arbiter,
            targets,
        })
    }

    pub fn tour(&self) -> &Arc<Tour> {
        &self.tour
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh idle state on the current grid, with its first target placed
    pub fn reset(&mut self) -> Result<AgentState, NavError> {
        let mut state = initialize(self.config.grid_size)?;
        self.place_target(&mut state)?;
        Ok(state)
    }

    /// Switch to another grid size and reset. The tour is only rebuilt when
    /// the size actually changes.
    pub fn resize(&mut self, grid_size: usize) -> Result<AgentState, NavError> {
        validate_grid_size(grid_size)?;
        if grid_size != self.tour.side() {
            self.tour = Arc::new(Tour::new(grid_size)?);
            debug!(grid_size, "cycle rebuilt");
        }
        self.config.grid_size = grid_size;
        self.reset()
    }

    /// Advance the run by one move
    pub fn step(&mut self, state: &mut AgentState) -> Result<StepResult, NavError> {
        if !state.is_running() {
            return Err(NavError::NotRunning(state.run_state));
        }

        let target = match state.target {
            Some(target) => target,
            None => self.place_target(state)?,
        };

        let head = state.head();
        let (next, source) = self.arbiter.choose_next(&self.tour, state, target);
        let ate_target = next == target;

        // The tail only vacates when the body does not grow
        let occupancy = OccupancyGrid::from_body(self.tour.side(), &state.body, !ate_target);
        if !self.tour.contains(next) || !head.is_adjacent(next) || occupancy.is_blocked(next) {
            error!(%head, %next, source = source.as_str(), "illegal move");
            state.run_state = RunState::Blocked;
            state.plan = None;
            return Err(NavError::IllegalMove {
                from: head,
                to: next,
            });
        }

        advance_body(&mut state.body, next, target);
        state.steps += 1;
        trace!(%next, source = source.as_str(), len = state.len(), "moved");

        if ate_target {
            state.apples += 1;
            state.plan = None;
            debug!(
                apples = state.apples,
                len = state.len(),
                steps = state.steps,
                "target eaten"
            );

            if state.is_full() {
                state.target = None;
                state.run_state = RunState::Finished;
                debug!(steps = state.steps, "grid filled");
            } else {
                self.place_target(state)?;
            }
        }

        Ok(StepResult {
            moved: next,
            source,
            ate_target,
            finished: state.is_finished(),
        })
    }

    /// Ask the target source for a free cell and store it on the state
    fn place_target(&mut self, state: &mut AgentState) -> Result<Cell, NavError> {
        let occupancy = OccupancyGrid::from_body(self.tour.side(), &state.body, false);

        match self.targets.request_new_target(&occupancy) {
            Some(cell) if occupancy.is_free(cell) => {
                state.target = Some(cell);
                Ok(cell)
            }
            Some(cell) => {
                error!(%cell, "target source returned an occupied cell");
                state.run_state = RunState::Blocked;
                Err(NavError::TargetOnBody(cell))
            }
            None => {
                state.target = None;
                state.run_state = if state.is_full() {
                    RunState::Finished
                } else {
                    error!(len = state.len(), "target source ran dry early");
                    RunState::Blocked
                };
                Err(NavError::NoFreeCellForTarget)
            }
        }
    }
}
