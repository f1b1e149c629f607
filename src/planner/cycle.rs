//! Hamiltonian cycle over the grid and its cell -> index inverse
//!
//! The cycle is a serpentine sweep: the bottom row left to right, the
//! remaining rows boustrophedon over columns `1..n`, then column 0 back down
//! to the origin. It only closes when `n` is even.

use crate::game::{validate_grid_size, Cell, NavError};

/// Build the serpentine tour for an `n`×`n` grid
pub fn build_cycle(n: usize) -> Result<Vec<Cell>, NavError> {
    validate_grid_size(n)?;

    let side = n as i32;
    let mut cycle = Vec::with_capacity(n * n);

    cycle.extend((0..side).map(|x| Cell::new(x, 0)));

    for y in 1..side {
        if y % 2 == 1 {
            cycle.extend((1..side).rev().map(|x| Cell::new(x, y)));
        } else {
            cycle.extend((1..side).map(|x| Cell::new(x, y)));
        }
    }

    cycle.extend((1..side).rev().map(|y| Cell::new(0, y)));

    Ok(cycle)
}

/// Position of every cell on the cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMap {
    side: usize,
    indices: Vec<usize>,
}

impl IndexMap {
    /// One pass over the cycle; `cycle` must cover a square grid
    pub fn build(cycle: &[Cell]) -> Self {
        let side = cycle.iter().map(|cell| cell.x as usize + 1).max().unwrap_or(0);
        let mut indices = vec![0; cycle.len()];
        for (index, cell) in cycle.iter().enumerate() {
            indices[cell.y as usize * side + cell.x as usize] = index;
        }
        Self { side, indices }
    }

    pub fn index_of(&self, cell: Cell) -> usize {
        self.indices[cell.y as usize * self.side + cell.x as usize]
    }

    /// Forward steps along the cycle from `a` to `b`
    pub fn cyclic_distance(&self, a: Cell, b: Cell) -> usize {
        let len = self.indices.len();
        (self.index_of(b) + len - self.index_of(a)) % len
    }
}

/// A grid's cycle together with its index map. Built once, shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    side: usize,
    cycle: Vec<Cell>,
    index: IndexMap,
}

impl Tour {
    pub fn new(side: usize) -> Result<Self, NavError> {
        let cycle = build_cycle(side)?;
        let index = IndexMap::build(&cycle);
        Ok(Self { side, cycle, index })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of cells on the cycle
    pub fn len(&self) -> usize {
        self.cycle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycle.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cycle
    }

    /// Whether `cell` lies on the grid
    pub fn contains(&self, cell: Cell) -> bool {
        let side = self.side as i32;
        (0..side).contains(&cell.x) && (0..side).contains(&cell.y)
    }

    pub fn index_of(&self, cell: Cell) -> usize {
        self.index.index_of(cell)
    }

    pub fn cell_at(&self, index: usize) -> Cell {
        self.cycle[index % self.cycle.len()]
    }

    /// The next cell on the cycle
    pub fn successor(&self, cell: Cell) -> Cell {
        self.cell_at(self.index_of(cell) + 1)
    }

    pub fn cyclic_distance(&self, a: Cell, b: Cell) -> usize {
        self.index.cyclic_distance(a, b)
    }
}
