use std::collections::VecDeque;

use tracing::trace;

use super::cycle::Tour;
use super::occupancy::OccupancyGrid;
use super::safety::{free_arc, has_free_neighbor_after};
use super::shortcut::{plan_path, Plan};
use crate::game::{AgentState, Cell};

/// Which strategy produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveSource {
    /// Next cell of a shortcut committed on an earlier tick
    PlanStep,
    /// First cell of a freshly synthesized shortcut
    Shortcut,
    /// Single greedy step while the body is short
    Greedy,
    /// The head's successor on the Hamiltonian cycle
    Cycle,
}

impl MoveSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveSource::PlanStep => "plan",
            MoveSource::Shortcut => "shortcut",
            MoveSource::Greedy => "greedy",
            MoveSource::Cycle => "cycle",
        }
    }
}

/// Picks the next cell each tick: committed plan, new shortcut, greedy step,
/// then the cycle successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveArbiter {
    greedy_short_body: bool,
}

impl MoveArbiter {
    pub fn new(greedy_short_body: bool) -> Self {
        Self { greedy_short_body }
    }

    /// Choose the next head cell. Updates `state.plan` but never the body.
    pub fn choose_next(
        &self,
        tour: &Tour,
        state: &mut AgentState,
        target: Cell,
    ) -> (Cell, MoveSource) {
        let target_index = tour.index_of(target);

        if let Some(next) = take_plan_step(&mut state.plan, target_index) {
            return (next, MoveSource::PlanStep);
        }

        match plan_path(tour, &state.body, target) {
            Ok(mut plan) => {
                if let Some(next) = plan.next_step() {
                    trace!(remaining = plan.remaining(), "shortcut committed");
                    if !plan.is_exhausted() {
                        state.plan = Some(plan);
                    }
                    return (next, MoveSource::Shortcut);
                }
            }
            Err(reason) => trace!(?reason, "no shortcut"),
        }

        if self.greedy_short_body && state.len() < tour.side() {
            if let Some(next) = greedy_step(tour, &state.body, target) {
                return (next, MoveSource::Greedy);
            }
        }

        (tour.successor(state.head()), MoveSource::Cycle)
    }
}

impl Default for MoveArbiter {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Pop the next cell of a plan made for this target; drop stale or spent plans
fn take_plan_step(slot: &mut Option<Plan>, target_index: usize) -> Option<Cell> {
    let next = match slot {
        Some(plan) if plan.is_for(target_index) => plan.next_step(),
        _ => None,
    };

    if slot
        .as_ref()
        .is_some_and(|plan| plan.is_exhausted() || !plan.is_for(target_index))
    {
        *slot = None;
    }

    next
}

/// Closest free neighbour to the target that stays on the forward arc and
/// leaves the head an exit.
fn greedy_step(tour: &Tour, body: &VecDeque<Cell>, target: Cell) -> Option<Cell> {
    let head = body[0];
    let arc = free_arc(tour, body);
    let to_target = tour.cyclic_distance(head, target);
    let occupancy = OccupancyGrid::from_body(tour.side(), body, true);

    let mut candidates: Vec<Cell> = head
        .neighbors()
        .into_iter()
        .filter(|&cell| occupancy.is_free(cell))
        .filter(|&cell| {
            let advance = tour.cyclic_distance(head, cell);
            advance > 0 && advance <= to_target && advance < arc
        })
        .collect();
    candidates.sort_by_key(|cell| cell.manhattan(target));

    candidates
        .into_iter()
        .find(|&cell| has_free_neighbor_after(tour, body, cell, target))
}
