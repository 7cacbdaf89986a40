use glam::Vec2;

use crate::engine::{Body, Fill, Tag};
use crate::grid::Grid;

pub const WALL_THICKNESS: f32 = 5.0;
pub const BOUNDARY_THICKNESS: f32 = 2.0;

/// Axis-aligned wall rectangle in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallRect {
    pub center: Vec2,
    pub size: Vec2,
}

impl WallRect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Static red maze wall.
    pub fn into_wall_body(self) -> Body {
        Body::rect(self.center, self.size, Tag::Wall).with_fill(Fill::Red)
    }

    pub fn into_boundary_body(self) -> Body {
        Body::rect(self.center, self.size, Tag::Boundary).with_fill(Fill::Grey)
    }
}

/// One rectangle for every interior wall that is still closed.
///
/// Horizontal walls come first in row-major order, then vertical walls.
pub fn project_walls(grid: &Grid, unit: Vec2) -> Vec<WallRect> {
    let mut walls = Vec::with_capacity(grid.interior_wall_count() - grid.open_count());

    for (r, row) in grid.horizontals().iter().enumerate() {
        for (c, &open) in row.iter().enumerate() {
            if open {
                continue;
            }
            walls.push(WallRect::new(
                Vec2::new(c as f32 * unit.x + unit.x / 2.0, r as f32 * unit.y + unit.y),
                Vec2::new(unit.x, WALL_THICKNESS),
            ));
        }
    }

    for (r, row) in grid.verticals().iter().enumerate() {
        for (c, &open) in row.iter().enumerate() {
            if open {
                continue;
            }
            walls.push(WallRect::new(
                Vec2::new(c as f32 * unit.x + unit.x, r as f32 * unit.y + unit.y / 2.0),
                Vec2::new(WALL_THICKNESS, unit.y),
            ));
        }
    }

    walls
}

/// Frame around the whole viewport: top, bottom, left, right.
pub fn boundary_walls(width: f32, height: f32) -> [WallRect; 4] {
    [
        WallRect::new(
            Vec2::new(width / 2.0, 0.0),
            Vec2::new(width, BOUNDARY_THICKNESS),
        ),
        WallRect::new(
            Vec2::new(width / 2.0, height),
            Vec2::new(width, BOUNDARY_THICKNESS),
        ),
        WallRect::new(
            Vec2::new(0.0, height / 2.0),
            Vec2::new(BOUNDARY_THICKNESS, height),
        ),
        WallRect::new(
            Vec2::new(width, height / 2.0),
            Vec2::new(BOUNDARY_THICKNESS, height),
        ),
    ]
}
