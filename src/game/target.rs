use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::state::Cell;
use crate::planner::OccupancyGrid;

/// Places the next target. Must never return an occupied cell, and returns
/// `None` only when no free cell is left.
pub trait TargetSource {
    fn request_new_target(&mut self, occupancy: &OccupancyGrid) -> Option<Cell>;
}

/// Uniform choice among the free cells
#[derive(Debug, Clone)]
pub struct RandomTargets {
    rng: StdRng,
}

impl RandomTargets {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for RandomTargets {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetSource for RandomTargets {
    fn request_new_target(&mut self, occupancy: &OccupancyGrid) -> Option<Cell> {
        occupancy.free_cells().choose(&mut self.rng).copied()
    }
}

/// Replays a fixed list of targets, then falls back to the lowest free cell.
/// Queued cells that are occupied by the time they come up are skipped.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTargets {
    queue: VecDeque<Cell>,
}

impl ScriptedTargets {
    pub fn new(targets: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            queue: targets.into_iter().collect(),
        }
    }
}

impl TargetSource for ScriptedTargets {
    fn request_new_target(&mut self, occupancy: &OccupancyGrid) -> Option<Cell> {
        while let Some(cell) = self.queue.pop_front() {
            if occupancy.is_free(cell) {
                return Some(cell);
            }
        }
        occupancy.free_cells().first().copied()
    }
}
