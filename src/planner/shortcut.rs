//! Direct shortcuts to the target that stay on the forward cycle arc
//!
//! A shortcut walks the Manhattan path to the target, but every step must land
//! between the current cell and the target in cycle order. The body therefore
//! stays ordered along the cycle and the cycle fallback remains legal after
//! the shortcut is spent.

use std::collections::VecDeque;

use super::cycle::Tour;
use super::occupancy::OccupancyGrid;
use super::safety::{advance_body, can_rejoin_cycle, free_arc};
use crate::game::Cell;

/// A committed route to one target, consumed one cell per tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    target_index: usize,
    steps: VecDeque<Cell>,
}

impl Plan {
    pub fn new(target_index: usize, steps: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            target_index,
            steps: steps.into_iter().collect(),
        }
    }

    /// Cycle index of the target this plan leads to
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn is_for(&self, target_index: usize) -> bool {
        self.target_index == target_index
    }

    pub fn next_step(&mut self) -> Option<Cell> {
        self.steps.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> impl Iterator<Item = &Cell> {
        self.steps.iter()
    }
}

/// Why no shortcut was produced. Always recovered by the cycle fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlanningExhausted {
    /// The target sits between tail and head; wait for the tail to pass it
    TargetBehindTail,
    /// The Manhattan route is longer than just following the cycle
    DetourNotShorter,
    /// No axis move toward the target was admissible at this step
    NoCandidate { step: usize },
    /// The walk ended somewhere other than the target
    MissedTarget,
    /// The cycle successor of the target would be inside the body
    CannotRejoin,
}

/// At most two axis moves toward `target`: larger offset first, ties horizontal
fn axis_moves(from: Cell, target: Cell) -> [Option<Cell>; 2] {
    let dx = target.x - from.x;
    let dy = target.y - from.y;
    let horizontal = (dx != 0).then(|| from.moved_by(dx.signum(), 0));
    let vertical = (dy != 0).then(|| from.moved_by(0, dy.signum()));

    if dx.abs() >= dy.abs() {
        [horizontal, vertical]
    } else {
        [vertical, horizontal]
    }
}

/// Try to build a shortcut from the head of `body` to `target`.
pub(crate) fn plan_path(
    tour: &Tour,
    body: &VecDeque<Cell>,
    target: Cell,
) -> Result<Plan, PlanningExhausted> {
    let head = body[0];
    let d_cycle = tour.cyclic_distance(head, target);

    if d_cycle >= free_arc(tour, body) {
        return Err(PlanningExhausted::TargetBehindTail);
    }

    let d_man = head.manhattan(target);
    if d_man > d_cycle {
        return Err(PlanningExhausted::DetourNotShorter);
    }

    let mut simulated = body.clone();
    let mut steps = Vec::with_capacity(d_man);
    let mut current = head;

    for step in 0..d_man {
        let remaining = tour.cyclic_distance(current, target);
        let admissible = |candidate: Cell| {
            if !tour.contains(candidate) {
                return false;
            }
            let occupancy =
                OccupancyGrid::from_body(tour.side(), &simulated, candidate != target);
            if occupancy.is_blocked(candidate) {
                return false;
            }
            let advance = tour.cyclic_distance(current, candidate);
            advance > 0 && advance <= remaining
        };

        let next = axis_moves(current, target)
            .into_iter()
            .flatten()
            .find(|&candidate| admissible(candidate))
            .ok_or(PlanningExhausted::NoCandidate { step })?;

        advance_body(&mut simulated, next, target);
        steps.push(next);
        current = next;
    }

    if current != target {
        return Err(PlanningExhausted::MissedTarget);
    }
    if !can_rejoin_cycle(tour, &simulated) {
        return Err(PlanningExhausted::CannotRejoin);
    }

    Ok(Plan::new(tour.index_of(target), steps))
}
