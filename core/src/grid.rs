//! The cell matrix.
//!
//! A grid has `width` columns along x, each holding `height` cells along y,
//! and is addressed as `(x, y)`. Every cell is a plain bool; there is no
//! "unknown" state. The grid is bounded: cells past an edge do not exist and
//! never count as neighbors.

use crate::{
    error::{SimError, SimResult},
    rng::SoupRng,
};

/// Offsets of the eight Moore-neighborhood cells.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Largest side length. Keeps the cell count well inside `u32`.
pub const MAX_DIMENSION: usize = 4096;

/// Clamp a requested dimension into `1..=MAX_DIMENSION`.
pub fn clamp_dimension(value: i64) -> usize {
    value.clamp(1, MAX_DIMENSION as i64) as usize
}

/// A bounded `width` x `height` matrix of live/dead cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width:  usize,
    height: usize,
    cells:  Vec<bool>,
}

impl Grid {
    /// An all-dead grid. Each side is clamped into `1..=MAX_DIMENSION`.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.clamp(1, MAX_DIMENSION);
        let height = height.clamp(1, MAX_DIMENSION);
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build a grid with exactly the listed cells alive.
    /// Coordinates outside the grid are ignored.
    pub fn with_alive(width: usize, height: usize, alive: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(width, height);
        for &(x, y) in alive {
            if grid.contains(x as i64, y as i64) {
                let idx = grid.index(x, y);
                grid.cells[idx] = true;
            }
        }
        grid
    }

    pub fn width(&self) -> usize  { self.width }
    pub fn height(&self) -> usize { self.height }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        (x < self.width && y < self.height).then(|| self.cells[self.index(x, y)])
    }

    /// Whether `(x, y)` is alive. Off-grid cells are dead.
    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.contains(x, y) && self.cells[self.index(x as usize, y as usize)]
    }

    /// Flip one cell and return its new state.
    pub fn toggle(&mut self, x: i64, y: i64) -> SimResult<bool> {
        if !self.contains(x, y) {
            return Err(SimError::OutOfBounds {
                x,
                y,
                width:  self.width,
                height: self.height,
            });
        }
        let idx = self.index(x as usize, y as usize);
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    /// Number of alive cells among the up to 8 in-bounds neighbors.
    pub fn count_alive_neighbors(&self, x: usize, y: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| u8::from(self.is_alive(x as i64 + dx, y as i64 + dy)))
            .sum()
    }

    pub fn alive_count(&self) -> u32 {
        self.cells.iter().filter(|&&c| c).count() as u32
    }

    /// The column of cells at `x`, indexed by y.
    pub fn column(&self, x: usize) -> &[bool] {
        let start = x * self.height;
        &self.cells[start..start + self.height]
    }

    /// Copy out as nested vectors indexed `[x][y]`.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells.chunks(self.height).map(<[bool]>::to_vec).collect()
    }

    /// Assemble a grid from per-column cell vectors. Used by the steppers,
    /// which always produce `width` columns of `height` cells.
    pub(crate) fn from_columns(width: usize, height: usize, columns: Vec<Vec<bool>>) -> Self {
        let cells: Vec<bool> = columns.into_iter().flatten().collect();
        debug_assert_eq!(cells.len(), width * height, "column data does not match dimensions");
        Self { width, height, cells }
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height, "cell data does not match dimensions");
        Self { width, height, cells }
    }

    /// Fill every cell with an independent Bernoulli(`density`) draw.
    pub fn randomize(&mut self, rng: &mut SoupRng, density: f64) {
        for cell in &mut self.cells {
            *cell = rng.chance(density);
        }
    }
}
