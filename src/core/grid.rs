//! Fixed-size, bounds-checked 2D grid.
//!
//! `Grid<T>` stores `Option<T>` per cell; `None` is a vacancy. Dimensions are
//! fixed at construction and never change for the lifetime of a session, so
//! every row operation preserves the row count.
//!
//! ```
//! use arcade_engine::core::{Cell, Grid};
//!
//! let mut grid: Grid<u8> = Grid::new(3, 2);
//! assert!(grid.set(Cell::new(2, 1), Some(7)));
//! assert_eq!(grid.get(Cell::new(2, 1)), Some(&7));
//!
//! // Out-of-bounds access is rejected, never a panic
//! assert!(!grid.set(Cell::new(3, 0), Some(1)));
//! assert_eq!(grid.get(Cell::new(-1, 0)), None);
//! ```

use serde::{Deserialize, Serialize};

use super::geometry::Cell;

/// Rectangular grid of optional cell contents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<Option<T>>,
}

impl<T> Grid<T> {
    /// Create an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "Grid dimensions must be non-zero");
        let mut cells = Vec::with_capacity(width * height);
        cells.resize_with(width * height, || None);
        Self { width, height, cells }
    }

    /// Create a grid filled by a factory called once per cell.
    pub fn from_fn(width: usize, height: usize, mut factory: impl FnMut(Cell) -> Option<T>) -> Self {
        let mut grid = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let cell = Cell::new(x as i32, y as i32);
                grid.cells[y * width + x] = factory(cell);
            }
        }
        grid
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Check whether a cell lies inside the grid.
    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.y as usize * self.width + cell.x as usize)
        } else {
            None
        }
    }

    /// Contents of a cell. `None` for vacancies and out-of-bounds cells.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.index(cell).and_then(|i| self.cells[i].as_ref())
    }

    /// Mutable contents of a cell.
    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut T> {
        self.index(cell).and_then(move |i| self.cells[i].as_mut())
    }

    /// True if the cell is inside the grid and holds an entity.
    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// True if the cell is inside the grid and vacant.
    #[must_use]
    pub fn is_vacant(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.cells[i].is_none())
    }

    /// Replace a cell's contents. Returns false if out of bounds.
    pub fn set(&mut self, cell: Cell, value: Option<T>) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Remove and return a cell's contents.
    pub fn take(&mut self, cell: Cell) -> Option<T> {
        self.index(cell).and_then(|i| self.cells[i].take())
    }

    /// Swap the contents of two cells. Returns false if either is out of bounds.
    pub fn swap(&mut self, a: Cell, b: Cell) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(i), Some(j)) => {
                self.cells.swap(i, j);
                true
            }
            _ => false,
        }
    }

    /// Iterate over occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, &T)> {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, v)| {
            v.as_ref()
                .map(|v| (Cell::new((i % width) as i32, (i / width) as i32), v))
        })
    }

    /// Iterate over vacant cells in row-major order.
    pub fn vacant(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .map(move |(i, _)| Cell::new((i % width) as i32, (i / width) as i32))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|v| v.is_some()).count()
    }

    /// True if every cell in row `y` is occupied.
    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && self.cells[y * self.width..(y + 1) * self.width].iter().all(Option::is_some)
    }

    /// Remove row `y`, shift every row above it down by one and insert an
    /// empty row at index 0. The row count is unchanged.
    pub fn remove_row_shift_down(&mut self, y: usize) {
        if y >= self.height {
            return;
        }
        let w = self.width;
        // Rotating rows 0..=y right by one row moves row y to the top.
        self.cells[..(y + 1) * w].rotate_right(w);
        for slot in &mut self.cells[..w] {
            *slot = None;
        }
    }

    /// Clear every cell.
    pub fn clear(&mut self) {
        for slot in &mut self.cells {
            *slot = None;
        }
    }
}
