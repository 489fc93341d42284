//! Stepping rule tests: the rule table, bounded edges, classic patterns,
//! and order independence.

use life_core::{
    grid::Grid,
    rng::SoupRng,
    step::{next_state, step, step_in_order, step_outcome, step_parallel},
};

/// The eight neighbors of (1, 1) on a 3x3 grid.
const RING: [(usize, usize); 8] = [
    (0, 0), (1, 0), (2, 0),
    (0, 1),         (2, 1),
    (0, 2), (1, 2), (2, 2),
];

fn soup(width: usize, height: usize, seed: u64, density: f64) -> Grid {
    let mut grid = Grid::new(width, height);
    grid.randomize(&mut SoupRng::new(seed), density);
    grid
}

#[test]
fn rule_table_covers_every_state_and_count() {
    for alive in [false, true] {
        for n in 0..=8usize {
            let mut cells: Vec<(usize, usize)> = RING[..n].to_vec();
            if alive {
                cells.push((1, 1));
            }
            let grid = Grid::with_alive(3, 3, &cells);
            assert_eq!(grid.count_alive_neighbors(1, 1) as usize, n);

            let expected = (alive && (n == 2 || n == 3)) || (!alive && n == 3);
            let (next, _) = step(&grid);
            assert_eq!(
                next.get(1, 1),
                Some(expected),
                "alive={alive} neighbors={n}: expected {expected}"
            );
            assert_eq!(next_state(alive, n as u8), expected);
        }
    }
}

#[test]
fn edges_do_not_wrap() {
    // (3, 0) would neighbor (0, 0) on a torus, giving it 2 neighbors.
    let grid = Grid::with_alive(4, 4, &[(0, 0), (1, 0), (3, 0)]);
    assert_eq!(grid.count_alive_neighbors(0, 0), 1);

    let (next, _) = step(&grid);
    assert_eq!(next.get(0, 0), Some(false), "corner cell with one neighbor must die");
}

#[test]
fn corner_counts_only_three_neighbors() {
    let mut grid = Grid::new(3, 3);
    for x in 0..3 {
        for y in 0..3 {
            grid.toggle(x, y).unwrap();
        }
    }
    assert_eq!(grid.count_alive_neighbors(0, 0), 3);
    assert_eq!(grid.count_alive_neighbors(1, 0), 5);
    assert_eq!(grid.count_alive_neighbors(1, 1), 8);
}

#[test]
fn block_is_a_still_life() {
    let block = Grid::with_alive(6, 6, &[(2, 2), (3, 2), (2, 3), (3, 3)]);
    let mut grid = block.clone();
    for generation in 1..=5 {
        let (next, alive) = step(&grid);
        assert_eq!(next, block, "block changed at generation {generation}");
        assert_eq!(alive, 4);
        grid = next;
    }
}

#[test]
fn blinker_has_period_two() {
    let horizontal = Grid::with_alive(5, 5, &[(1, 2), (2, 2), (3, 2)]);
    let vertical = Grid::with_alive(5, 5, &[(2, 1), (2, 2), (2, 3)]);

    let (once, alive) = step(&horizontal);
    assert_eq!(once, vertical);
    assert_eq!(alive, 3);

    let (twice, _) = step(&once);
    assert_eq!(twice, horizontal);
}

#[test]
fn step_reports_births_and_deaths() {
    let horizontal = Grid::with_alive(5, 5, &[(1, 2), (2, 2), (3, 2)]);
    let outcome = step_outcome(&horizontal);
    assert_eq!(outcome.births, 2);
    assert_eq!(outcome.deaths, 2);
    assert_eq!(outcome.alive, 3);
}

#[test]
fn empty_grid_stays_empty() {
    let (next, alive) = step(&Grid::new(1, 1));
    assert_eq!(alive, 0);
    assert_eq!(next, Grid::new(1, 1));
}

#[test]
fn traversal_order_does_not_matter() {
    let grid = soup(12, 9, 0xC0FFEE, 0.4);
    let (reference, _) = step(&grid);
    let (w, h) = (grid.width(), grid.height());
    let area = w * h;

    let x_major: Vec<_> = (0..w).flat_map(|x| (0..h).map(move |y| (x, y))).collect();
    let y_major: Vec<_> = (0..h).flat_map(|y| (0..w).map(move |x| (x, y))).collect();
    let reversed: Vec<_> = x_major.iter().rev().copied().collect();
    // 7 is coprime with 108, so this visits every cell exactly once.
    let strided: Vec<_> = (0..area).map(|i| (i * 7) % area).map(|i| (i / h, i % h)).collect();

    for (name, order) in [
        ("x-major", x_major),
        ("y-major", y_major),
        ("reversed", reversed),
        ("strided", strided),
    ] {
        assert_eq!(step_in_order(&grid, order), reference, "{name} traversal diverged");
    }
}

#[test]
fn parallel_step_matches_sequential() {
    for seed in [1u64, 2, 3, 0xDEAD_BEEF] {
        let grid = soup(70, 45, seed, 0.35);
        assert_eq!(
            step_parallel(&grid),
            step_outcome(&grid),
            "parallel step diverged for seed {seed}"
        );
    }
}
