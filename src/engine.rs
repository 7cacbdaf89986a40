//! Interface between the game session and whatever simulates and draws the bodies.
//!
//! The session only ever talks to an [`Engine`]; [`crate::physics::World`] is the
//! built-in implementation used by the terminal front end.

use glam::Vec2;

/// Semantic label carried by every body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Wall,
    Boundary,
    Goal,
    Ball,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Red,
    Green,
    Blue,
    Grey,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Rect { half_extents: Vec2 },
    Circle { radius: f32 },
}

impl Shape {
    /// Half size of the bounding box.
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Rect { half_extents } => half_extents,
            Shape::Circle { radius } => Vec2::splat(radius),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub shape: Shape,
    pub tag: Tag,
    pub fill: Fill,
    pub is_static: bool,
}

impl Body {
    /// Static rectangle centred on `center`.
    pub fn rect(center: Vec2, size: Vec2, tag: Tag) -> Self {
        Self {
            position: center,
            velocity: Vec2::ZERO,
            shape: Shape::Rect {
                half_extents: size / 2.0,
            },
            tag,
            fill: Fill::Grey,
            is_static: true,
        }
    }

    /// Dynamic circle centred on `center`.
    pub fn circle(center: Vec2, radius: f32, tag: Tag) -> Self {
        Self {
            position: center,
            velocity: Vec2::ZERO,
            shape: Shape::Circle { radius },
            tag,
            fill: Fill::Grey,
            is_static: false,
        }
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    /// Bounding box as `(min, max)`.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let half = self.shape.half_extents();
        (self.position - half, self.position + half)
    }
}

/// Two bodies that started touching during the last step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collision {
    pub a: BodyId,
    pub b: BodyId,
    pub tag_a: Tag,
    pub tag_b: Tag,
}

pub trait Engine {
    fn add_body(&mut self, body: Body) -> BodyId;

    fn set_gravity(&mut self, gravity: Vec2);

    fn velocity(&self, id: BodyId) -> Vec2;

    fn set_velocity(&mut self, id: BodyId, velocity: Vec2);

    /// Switch a body between immovable and simulated.
    fn set_static(&mut self, id: BodyId, is_static: bool);

    fn tag(&self, id: BodyId) -> Tag;

    /// Advance the simulation by one tick.
    fn step(&mut self);

    /// Collision-start events accumulated since the previous call.
    fn drain_collisions(&mut self) -> Vec<Collision>;
}
