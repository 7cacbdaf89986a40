use log::debug;
use rand::Rng;

use crate::error::Result;
use crate::grid::{Cell, Direction, Grid};
use crate::shuffle::{RandomShuffle, Shuffle};

struct Frame {
    cell: Cell,
    directions: [Direction; 4],
    next: usize,
}

/// Randomized depth-first carving from `start`.
///
/// Runs on an explicit stack so deep grids do not exhaust the call stack. Visit order
/// matches the recursive formulation: a cell is entered, marked, its four directions
/// shuffled, and each unvisited in-bounds neighbour is opened and entered before the
/// next direction is considered. Carving an already visited start is a no-op.
pub fn carve<S: Shuffle>(grid: &mut Grid, start: Cell, shuffle: &mut S) {
    let mut stack = Vec::new();
    if let Some(frame) = enter(grid, start, shuffle) {
        stack.push(frame);
    }

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = frame.directions.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;

        let Some(next) = grid.neighbor(cell, direction) else {
            continue;
        };
        if grid.is_visited(next) {
            continue;
        }
        grid.open_between(cell, direction);
        if let Some(frame) = enter(grid, next, shuffle) {
            stack.push(frame);
        }
    }
}

fn enter<S: Shuffle>(grid: &mut Grid, cell: Cell, shuffle: &mut S) -> Option<Frame> {
    if grid.is_visited(cell) {
        return None;
    }
    grid.mark_visited(cell);
    let mut directions = Direction::ALL;
    shuffle.shuffle(&mut directions);
    Some(Frame {
        cell,
        directions,
        next: 0,
    })
}

/// Builds a fresh `rows x cols` grid and carves it from a uniformly random start cell.
pub fn generate<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Grid> {
    let mut grid = Grid::new(rows, cols)?;
    let start = Cell::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
    debug!("carving {rows}x{cols} maze from ({}, {})", start.row, start.col);
    carve(&mut grid, start, &mut RandomShuffle::new(rng));
    Ok(grid)
}
