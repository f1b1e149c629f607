//! Path planning: the Hamiltonian cycle and the shortcuts taken off it

pub mod arbiter;
pub mod cycle;
pub mod occupancy;
pub mod safety;
pub mod shortcut;

pub use arbiter::{MoveArbiter, MoveSource};
pub use cycle::{build_cycle, IndexMap, Tour};
pub use occupancy::OccupancyGrid;
pub use safety::{can_rejoin_cycle, free_arc, has_free_neighbor_after};
pub use shortcut::Plan;
