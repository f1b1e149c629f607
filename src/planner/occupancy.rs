use std::collections::VecDeque;

use crate::game::Cell;

/// Which cells of the grid the body currently blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    side: usize,
    blocked: Vec<bool>,
}

impl OccupancyGrid {
    /// Mark every body segment. With `exclude_tail` the last segment stays free,
    /// since it vacates on any move that does not grow the body.
    pub fn from_body(side: usize, body: &VecDeque<Cell>, exclude_tail: bool) -> Self {
        let mut blocked = vec![false; side * side];
        let take = if exclude_tail {
            body.len().saturating_sub(1)
        } else {
            body.len()
        };

        for cell in body.iter().take(take) {
            blocked[cell.y as usize * side + cell.x as usize] = true;
        }

        Self { side, blocked }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    fn slot(&self, cell: Cell) -> Option<usize> {
        let side = self.side as i32;
        if (0..side).contains(&cell.x) && (0..side).contains(&cell.y) {
            Some(cell.y as usize * self.side + cell.x as usize)
        } else {
            None
        }
    }

    /// Off-grid cells are never free
    pub fn is_free(&self, cell: Cell) -> bool {
        self.slot(cell).is_some_and(|slot| !self.blocked[slot])
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.slot(cell).is_some_and(|slot| self.blocked[slot])
    }

    pub fn free_cells(&self) -> Vec<Cell> {
        let side = self.side;
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, blocked)| !**blocked)
            .map(|(slot, _)| Cell::new((slot % side) as i32, (slot / side) as i32))
            .collect()
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&blocked| blocked).count()
    }
}
