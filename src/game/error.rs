use thiserror::Error;

use super::state::{Cell, RunState};

/// Errors surfaced by the navigation core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("grid size must be even and positive, got {0}")]
    InvalidGridSize(usize),

    #[error("tick interval must be positive")]
    InvalidTickInterval,

    /// The body covers every cell; the run is over
    #[error("no free cell left for a target")]
    NoFreeCellForTarget,

    /// The target source handed back a cell inside the body
    #[error("target {0} is on the body")]
    TargetOnBody(Cell),

    /// A chosen move was off the grid, not adjacent or into the body
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Cell, to: Cell },

    #[error("cannot tick while {0:?}")]
    NotRunning(RunState),
}
