use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use crate::error::{MazeError, Result};

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 14;
pub const DEFAULT_TICK_MS: u64 = 16;
pub const DEFAULT_RENDER_FPS: u64 = 60;
/// World units covered by one terminal column when the viewport is derived.
pub const UNITS_PER_COLUMN: f32 = 10.0;
/// World units covered by one terminal row; rows are about twice as tall as columns.
pub const UNITS_PER_ROW: f32 = 20.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Roll a ball through a freshly carved maze", long_about = None)]
pub struct Args {
    /// Number of maze rows
    #[arg(short, long, env = "MAZE_ROWS", default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Number of maze columns
    #[arg(short, long, env = "MAZE_COLS", default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// World width; derived from the terminal when omitted
    #[arg(long)]
    pub width: Option<f32>,

    /// World height; derived from the terminal when omitted
    #[arg(long)]
    pub height: Option<f32>,

    /// Milliseconds per simulation tick
    #[arg(long, env = "MAZE_TICK_MS", default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Redraw rate
    #[arg(long, env = "MAZE_FPS", default_value_t = DEFAULT_RENDER_FPS)]
    pub fps: u64,

    /// Seed for reproducible mazes
    #[arg(long, env = "MAZE_SEED")]
    pub seed: Option<u64>,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long, env = "MAZE_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Validated maze layout, filling in the viewport from `term_size` (columns, rows
    /// available for the playfield) when no explicit size was given.
    pub fn maze_config(&self, term_size: (u16, u16)) -> Result<MazeConfig> {
        let width = self
            .width
            .unwrap_or(term_size.0 as f32 * UNITS_PER_COLUMN);
        let height = self
            .height
            .unwrap_or(term_size.1 as f32 * UNITS_PER_ROW);
        MazeConfig::new(self.rows, self.cols, width, height)
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms.max(1)
    }

    pub fn fps(&self) -> u64 {
        self.fps.max(1)
    }
}

/// Grid dimensions plus the world-space viewport they are laid over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    pub width: f32,
    pub height: f32,
}

impl MazeConfig {
    pub fn new(rows: usize, cols: usize, width: f32, height: f32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(MazeError::InvalidViewport { width, height });
        }
        Ok(Self {
            rows,
            cols,
            width,
            height,
        })
    }

    /// Size of one cell in world units.
    pub fn unit(&self) -> Vec2 {
        Vec2::new(self.width / self.cols as f32, self.height / self.rows as f32)
    }
}
