use std::collections::VecDeque;
use std::fmt;

use super::config::validate_grid_size;
use super::direction::Direction;
use super::error::NavError;
use crate::planner::Plan;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Bottom-left corner, where every run starts
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// The four orthogonal neighbours, possibly off the grid
    pub fn neighbors(&self) -> [Cell; 4] {
        Direction::ALL.map(|direction| self.moved_in_direction(direction))
    }

    pub fn manhattan(&self, other: Cell) -> usize {
        (self.x.abs_diff(other.x) + self.y.abs_diff(other.y)) as usize
    }

    pub fn is_adjacent(&self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// Direction of the unit step from `self` to `other`
    pub fn direction_to(&self, other: Cell) -> Option<Direction> {
        Direction::from_delta(other.x - self.x, other.y - self.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Built, waiting for a start signal
    Idle,
    /// Ticks are being applied
    Running,
    /// The body covers the whole grid
    Finished,
    /// A move broke an invariant; the run cannot continue
    Blocked,
}

/// Everything that changes from one tick to the next
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub grid_size: usize,
    /// Body segments, with head at index 0
    pub body: VecDeque<Cell>,
    pub target: Option<Cell>,
    /// Committed shortcut towards the current target
    pub plan: Option<Plan>,
    pub steps: u32,
    pub apples: u32,
    pub run_state: RunState,
}

impl AgentState {
    /// Fresh idle state with a one-cell body and no target yet
    pub fn new(grid_size: usize, start: Cell) -> Self {
        Self {
            grid_size,
            body: VecDeque::from([start]),
            target: None,
            plan: None,
            steps: 0,
            apples: 0,
            run_state: RunState::Idle,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true for a reachable state
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn total_cells(&self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn is_full(&self) -> bool {
        self.body.len() == self.total_cells()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Idle -> Running. Terminal states stay where they are.
    pub fn start(&mut self) {
        if self.run_state == RunState::Idle {
            self.run_state = RunState::Running;
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.run_state == RunState::Finished
    }
}

/// Validate the grid size and build the starting state for it
pub fn initialize(grid_size: usize) -> Result<AgentState, NavError> {
    validate_grid_size(grid_size)?;
    Ok(AgentState::new(grid_size, Cell::ORIGIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_in_direction(Direction::North), Cell::new(5, 6));
        assert_eq!(cell.moved_in_direction(Direction::West), Cell::new(4, 5));
    }

    #[test]
    fn test_neighbors_follow_direction_order() {
        let cell = Cell::new(2, 2);
        assert_eq!(
            cell.neighbors(),
            [
                Cell::new(2, 3),
                Cell::new(2, 1),
                Cell::new(1, 2),
                Cell::new(3, 2)
            ]
        );
    }

    #[test]
    fn test_manhattan_and_adjacency() {
        let a = Cell::new(0, 0);
        assert_eq!(a.manhattan(Cell::new(3, 2)), 5);
        assert!(a.is_adjacent(Cell::new(0, 1)));
        assert!(!a.is_adjacent(Cell::new(1, 1)));
        assert!(!a.is_adjacent(a));
        assert_eq!(a.direction_to(Cell::new(1, 0)), Some(Direction::East));
        assert_eq!(a.direction_to(Cell::new(1, 1)), None);
        assert_eq!(Cell::new(3, 2).to_string(), "(3, 2)");
    }

    #[test]
    fn test_initialize() {
        let state = initialize(6).unwrap();
        assert_eq!(state.len(), 1);
        assert_eq!(state.head(), Cell::ORIGIN);
        assert_eq!(state.tail(), Cell::ORIGIN);
        assert_eq!(state.run_state, RunState::Idle);
        assert_eq!(state.total_cells(), 36);
        assert!(state.target.is_none());
    }

    #[test]
    fn test_initialize_rejects_bad_sizes() {
        assert!(matches!(initialize(5), Err(NavError::InvalidGridSize(5))));
        assert!(matches!(initialize(0), Err(NavError::InvalidGridSize(0))));
    }

    #[test]
    fn test_start_only_leaves_idle() {
        let mut state = initialize(4).unwrap();
        state.start();
        assert!(state.is_running());

        state.run_state = RunState::Finished;
        state.start();
        assert!(state.is_finished());
    }
}
