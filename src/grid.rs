use crate::error::{MazeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Row and column offset of a single step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Visited flags plus the two passage matrices of a rectangular maze.
///
/// `verticals[r][c]` is the wall between `(r, c)` and `(r, c + 1)`;
/// `horizontals[r][c]` is the wall between `(r, c)` and `(r + 1, c)`.
/// `true` means the wall has been removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    visited: Vec<Vec<bool>>,
    verticals: Vec<Vec<bool>>,
    horizontals: Vec<Vec<bool>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            visited: vec![vec![false; cols]; rows],
            verticals: vec![vec![false; cols - 1]; rows],
            horizontals: vec![vec![false; cols]; rows - 1],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_visited(&self, cell: Cell) -> bool {
        self.check_cell(cell);
        self.visited[cell.row][cell.col]
    }

    pub fn mark_visited(&mut self, cell: Cell) {
        self.check_cell(cell);
        self.visited[cell.row][cell.col] = true;
    }

    pub fn all_visited(&self) -> bool {
        self.visited.iter().flatten().all(|&v| v)
    }

    /// Opens the passage between `(row, col)` and `(row, col + 1)`.
    pub fn open_vertical(&mut self, row: usize, col: usize) {
        assert!(
            row < self.rows && col + 1 < self.cols,
            "vertical passage ({row}, {col}) out of range for {}x{} grid",
            self.rows,
            self.cols
        );
        let open = &mut self.verticals[row][col];
        assert!(!*open, "vertical passage ({row}, {col}) opened twice");
        *open = true;
    }

    /// Opens the passage between `(row, col)` and `(row + 1, col)`.
    pub fn open_horizontal(&mut self, row: usize, col: usize) {
        assert!(
            row + 1 < self.rows && col < self.cols,
            "horizontal passage ({row}, {col}) out of range for {}x{} grid",
            self.rows,
            self.cols
        );
        let open = &mut self.horizontals[row][col];
        assert!(!*open, "horizontal passage ({row}, {col}) opened twice");
        *open = true;
    }

    /// Opens the wall on the `direction` side of `cell`.
    pub fn open_between(&mut self, cell: Cell, direction: Direction) {
        let Cell { row, col } = cell;
        match direction {
            Direction::Left => {
                assert!(col > 0, "no cell left of ({row}, {col})");
                self.open_vertical(row, col - 1);
            }
            Direction::Right => self.open_vertical(row, col),
            Direction::Up => {
                assert!(row > 0, "no cell above ({row}, {col})");
                self.open_horizontal(row - 1, col);
            }
            Direction::Down => self.open_horizontal(row, col),
        }
    }

    pub fn is_vertical_open(&self, row: usize, col: usize) -> bool {
        self.verticals[row][col]
    }

    pub fn is_horizontal_open(&self, row: usize, col: usize) -> bool {
        self.horizontals[row][col]
    }

    /// Whether `cell` has an open passage towards `direction`. Edges of the grid are
    /// always closed.
    pub fn is_open(&self, cell: Cell, direction: Direction) -> bool {
        if self.neighbor(cell, direction).is_none() {
            return false;
        }
        let Cell { row, col } = cell;
        match direction {
            Direction::Left => self.verticals[row][col - 1],
            Direction::Right => self.verticals[row][col],
            Direction::Up => self.horizontals[row - 1][col],
            Direction::Down => self.horizontals[row][col],
        }
    }

    /// In-bounds neighbour of `cell` in `direction`.
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        let row = cell.row as isize + dr;
        let col = cell.col as isize + dc;
        if row < 0 || row >= self.rows as isize || col < 0 || col >= self.cols as isize {
            return None;
        }
        Some(Cell::new(row as usize, col as usize))
    }

    pub fn verticals(&self) -> &[Vec<bool>] {
        &self.verticals
    }

    pub fn horizontals(&self) -> &[Vec<bool>] {
        &self.horizontals
    }

    /// Number of removed walls across both passage matrices.
    pub fn open_count(&self) -> usize {
        self.verticals
            .iter()
            .chain(self.horizontals.iter())
            .flatten()
            .filter(|&&open| open)
            .count()
    }

    /// Number of interior walls a fully closed grid has.
    pub fn interior_wall_count(&self) -> usize {
        (self.rows - 1) * self.cols + self.rows * (self.cols - 1)
    }

    fn check_cell(&self, cell: Cell) {
        assert!(
            cell.row < self.rows && cell.col < self.cols,
            "cell ({}, {}) out of range for {}x{} grid",
            cell.row,
            cell.col,
            self.rows,
            self.cols
        );
    }
}
