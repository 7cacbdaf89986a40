//! Small rigid-body world: axis-aligned rectangles and circles, no rotation.
//!
//! Velocities are in world units per tick. Each tick is split into substeps short enough
//! that no moving body travels more than half its own thickness between contact checks.
//! Contacts are resolved by pushing bodies apart along the contact normal and cancelling
//! the approaching part of their relative velocity (no bounce).

use std::collections::HashSet;

use glam::Vec2;

use crate::engine::{Body, BodyId, Collision, Engine, Shape, Tag};

/// Gravity vector to per-tick acceleration.
pub const GRAVITY_SCALE: f32 = 0.25;
pub const AIR_FRICTION: f32 = 0.01;
/// Per-tick speed cap.
pub const MAX_SPEED: f32 = 24.0;
/// Share of a moving body's smallest half-extent it may cover in one substep.
const SUBSTEP_REACH: f32 = 0.5;
const MAX_SUBSTEPS: u32 = 64;
/// Bodies closer than this count as touching.
const CONTACT_SLOP: f32 = 0.05;

#[derive(Clone, Copy, Debug)]
struct Contact {
    a: usize,
    b: usize,
    /// Unit vector from `a` towards `b`.
    normal: Vec2,
    depth: f32,
}

#[derive(Debug, Default)]
pub struct World {
    bodies: Vec<Body>,
    gravity: Vec2,
    touching: HashSet<(usize, usize)>,
    events: Vec<Collision>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn apply_forces(&mut self) {
        let gravity = self.gravity * GRAVITY_SCALE;
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.velocity += gravity;
            body.velocity *= 1.0 - AIR_FRICTION;
            body.velocity = body.velocity.clamp_length_max(MAX_SPEED);
        }
    }

    /// Number of substeps this tick needs so every dynamic body stays within its reach.
    fn substeps(&self) -> u32 {
        let mut count = 1;
        for body in self.bodies.iter().filter(|b| !b.is_static) {
            let speed = body.velocity.length();
            if speed == 0.0 {
                continue;
            }
            let reach = body.shape.half_extents().min_element() * SUBSTEP_REACH;
            if reach <= 0.0 {
                return MAX_SUBSTEPS;
            }
            count = count.max((speed / reach).ceil() as u32);
        }
        count.min(MAX_SUBSTEPS)
    }

    fn advance(&mut self, fraction: f32) {
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.position += body.velocity * fraction;
        }
    }

    fn detect_contacts(&self) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if a.is_static && b.is_static {
                    continue;
                }
                if !bounds_overlap(a, b) {
                    continue;
                }
                if let Some((normal, depth)) = test_pair(a, b) {
                    contacts.push(Contact {
                        a: i,
                        b: j,
                        normal,
                        depth,
                    });
                }
            }
        }
        contacts
    }

    fn resolve(&mut self, contact: &Contact) {
        let inv_a = inverse_mass(&self.bodies[contact.a]);
        let inv_b = inverse_mass(&self.bodies[contact.b]);
        let total = inv_a + inv_b;
        if total == 0.0 {
            return;
        }

        let correction = contact.normal * (contact.depth.max(0.0) / total);
        let relative = self.bodies[contact.b].velocity - self.bodies[contact.a].velocity;
        let approach = relative.dot(contact.normal);
        let impulse = if approach < 0.0 {
            contact.normal * (-approach / total)
        } else {
            Vec2::ZERO
        };

        let a = &mut self.bodies[contact.a];
        a.position -= correction * inv_a;
        a.velocity -= impulse * inv_a;
        let b = &mut self.bodies[contact.b];
        b.position += correction * inv_b;
        b.velocity += impulse * inv_b;
    }
}

impl Engine for World {
    fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        id
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn velocity(&self, id: BodyId) -> Vec2 {
        self.bodies[id.0].velocity
    }

    fn set_velocity(&mut self, id: BodyId, velocity: Vec2) {
        self.bodies[id.0].velocity = velocity;
    }

    fn set_static(&mut self, id: BodyId, is_static: bool) {
        let body = &mut self.bodies[id.0];
        body.is_static = is_static;
        if is_static {
            body.velocity = Vec2::ZERO;
        }
    }

    fn tag(&self, id: BodyId) -> Tag {
        self.bodies[id.0].tag
    }

    fn step(&mut self) {
        self.apply_forces();

        let substeps = self.substeps();
        let fraction = 1.0 / substeps as f32;
        let mut touching = HashSet::new();
        for _ in 0..substeps {
            self.advance(fraction);
            for contact in self.detect_contacts() {
                let key = (contact.a, contact.b);
                // A pair touching at several substeps still starts only once per tick.
                if touching.insert(key) && !self.touching.contains(&key) {
                    self.events.push(Collision {
                        a: BodyId(contact.a),
                        b: BodyId(contact.b),
                        tag_a: self.bodies[contact.a].tag,
                        tag_b: self.bodies[contact.b].tag,
                    });
                }
                self.resolve(&contact);
            }
        }
        self.touching = touching;
    }

    fn drain_collisions(&mut self) -> Vec<Collision> {
        std::mem::take(&mut self.events)
    }
}

fn inverse_mass(body: &Body) -> f32 {
    if body.is_static {
        0.0
    } else {
        1.0
    }
}

fn bounds_overlap(a: &Body, b: &Body) -> bool {
    let (min_a, max_a) = a.bounds();
    let (min_b, max_b) = b.bounds();
    min_a.x <= max_b.x + CONTACT_SLOP
        && max_a.x + CONTACT_SLOP >= min_b.x
        && min_a.y <= max_b.y + CONTACT_SLOP
        && max_a.y + CONTACT_SLOP >= min_b.y
}

/// Contact normal (from `a` to `b`) and penetration depth, or `None` if apart.
fn test_pair(a: &Body, b: &Body) -> Option<(Vec2, f32)> {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a.position, ra, b.position, rb)
        }
        (Shape::Circle { radius }, Shape::Rect { half_extents }) => circle_rect(
            a.position,
            radius,
            b.position,
            half_extents,
            a.velocity - b.velocity,
        ),
        (Shape::Rect { half_extents }, Shape::Circle { radius }) => circle_rect(
            b.position,
            radius,
            a.position,
            half_extents,
            b.velocity - a.velocity,
        )
        .map(|(normal, depth)| (-normal, depth)),
        (Shape::Rect { half_extents: ha }, Shape::Rect { half_extents: hb }) => {
            rect_rect(a.position, ha, b.position, hb)
        }
    }
}

fn circle_circle(pa: Vec2, ra: f32, pb: Vec2, rb: f32) -> Option<(Vec2, f32)> {
    let diff = pb - pa;
    let dist = diff.length();
    let depth = ra + rb - dist;
    if depth <= -CONTACT_SLOP {
        return None;
    }
    let normal = if dist > 0.0 { diff / dist } else { Vec2::X };
    Some((normal, depth))
}

/// `motion` is the circle's velocity relative to the rectangle.
fn circle_rect(
    center: Vec2,
    radius: f32,
    rect: Vec2,
    half: Vec2,
    motion: Vec2,
) -> Option<(Vec2, f32)> {
    let local = center - rect;
    let closest = local.clamp(-half, half);
    let diff = local - closest;
    let dist = diff.length();

    if dist > 0.0 {
        let depth = radius - dist;
        if depth <= -CONTACT_SLOP {
            return None;
        }
        // Normal from the circle into the rectangle.
        return Some((-diff / dist, depth));
    }

    // Centre inside the rectangle: pick the shallowest axis, then back out the way the
    // circle came in. A resting circle leaves through the nearer face.
    let penetration = half - local.abs();
    let along_x = penetration.x < penetration.y;
    let (offset, extent, moving) = if along_x {
        (local.x, half.x, motion.x)
    } else {
        (local.y, half.y, motion.y)
    };
    let side = if moving != 0.0 {
        -sign(moving)
    } else {
        sign(offset)
    };
    let outward = if along_x {
        Vec2::new(side, 0.0)
    } else {
        Vec2::new(0.0, side)
    };
    Some((-outward, radius + extent - side * offset))
}

fn rect_rect(pa: Vec2, ha: Vec2, pb: Vec2, hb: Vec2) -> Option<(Vec2, f32)> {
    let diff = pb - pa;
    let overlap = ha + hb - diff.abs();
    if overlap.x <= -CONTACT_SLOP || overlap.y <= -CONTACT_SLOP {
        return None;
    }
    if overlap.x < overlap.y {
        Some((Vec2::new(sign(diff.x), 0.0), overlap.x))
    } else {
        Some((Vec2::new(0.0, sign(diff.y)), overlap.y))
    }
}

fn sign(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}
