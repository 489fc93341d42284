//! Generation stepping.
//!
//! RULES:
//!   - The next generation is computed into a fresh grid.
//!   - Every cell reads ONLY the prior generation, so the order in which
//!     cells are visited never changes the result. The rayon path relies on
//!     this.

use crate::grid::Grid;
use rayon::prelude::*;

/// The life/death rule table, checked in priority order.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true,  // survival
        (false, 3)            => true,  // birth
        _                     => false, // under/overpopulation, or stays dead
    }
}

/// Result of one generation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub next:   Grid,
    pub alive:  u32,
    pub births: u32,
    pub deaths: u32,
}

impl StepOutcome {
    fn from_next(prev: &Grid, next: Grid) -> Self {
        let mut alive = 0;
        let mut births = 0;
        let mut deaths = 0;
        for x in 0..prev.width() {
            for (&before, &after) in prev.column(x).iter().zip(next.column(x)) {
                alive += u32::from(after);
                births += u32::from(!before && after);
                deaths += u32::from(before && !after);
            }
        }
        Self { next, alive, births, deaths }
    }
}

fn next_column(grid: &Grid, x: usize) -> Vec<bool> {
    grid.column(x)
        .iter()
        .enumerate()
        .map(|(y, &alive)| next_state(alive, grid.count_alive_neighbors(x, y)))
        .collect()
}

/// Produce the next generation and its alive count.
pub fn step(grid: &Grid) -> (Grid, u32) {
    let outcome = step_outcome(grid);
    (outcome.next, outcome.alive)
}

/// Sequential stepping with birth/death statistics.
pub fn step_outcome(grid: &Grid) -> StepOutcome {
    let columns = (0..grid.width()).map(|x| next_column(grid, x)).collect();
    let next = Grid::from_columns(grid.width(), grid.height(), columns);
    StepOutcome::from_next(grid, next)
}

/// Same result as [`step_outcome`], with columns computed on the rayon pool.
pub fn step_parallel(grid: &Grid) -> StepOutcome {
    let columns = (0..grid.width())
        .into_par_iter()
        .map(|x| next_column(grid, x))
        .collect();
    let next = Grid::from_columns(grid.width(), grid.height(), columns);
    StepOutcome::from_next(grid, next)
}

/// Step by visiting cells in the caller's order. Cells the order never
/// visits come out dead.
pub fn step_in_order<I>(grid: &Grid, order: I) -> Grid
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut cells = vec![false; grid.area()];
    for (x, y) in order {
        if let Some(alive) = grid.get(x, y) {
            cells[x * grid.height() + y] = next_state(alive, grid.count_alive_neighbors(x, y));
        }
    }
    Grid::from_cells(grid.width(), grid.height(), cells)
}
