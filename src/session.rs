use glam::Vec2;
use log::info;
use rand::Rng;

use crate::carver;
use crate::config::MazeConfig;
use crate::engine::{Body, BodyId, Collision, Engine, Fill, Tag};
use crate::error::Result;
use crate::grid::{Direction, Grid};
use crate::input;
use crate::walls::{boundary_walls, project_walls};

pub const GOAL_SCALE: f32 = 0.7;
pub const BALL_RADIUS_SCALE: f32 = 0.25;
/// Downward pull switched on once the ball reaches the goal.
pub const WIN_GRAVITY: Vec2 = Vec2::new(0.0, 1.0);

/// `true` for a ball touching the goal, in either order.
pub fn is_winning_pair(a: Tag, b: Tag) -> bool {
    matches!((a, b), (Tag::Ball, Tag::Goal) | (Tag::Goal, Tag::Ball))
}

/// One playthrough: a carved maze laid into an engine, plus the win state.
#[derive(Debug)]
pub struct GameSession {
    config: MazeConfig,
    grid: Grid,
    ball: BodyId,
    goal: BodyId,
    walls: Vec<BodyId>,
    won: bool,
}

impl GameSession {
    /// Carves a new maze and populates `engine` with boundary, walls, goal and ball.
    pub fn start<E: Engine, R: Rng>(
        config: MazeConfig,
        engine: &mut E,
        rng: &mut R,
    ) -> Result<Self> {
        let grid = carver::generate(config.rows, config.cols, rng)?;
        let unit = config.unit();

        engine.set_gravity(Vec2::ZERO);
        for rect in boundary_walls(config.width, config.height) {
            engine.add_body(rect.into_boundary_body());
        }

        let walls: Vec<BodyId> = project_walls(&grid, unit)
            .into_iter()
            .map(|rect| engine.add_body(rect.into_wall_body()))
            .collect();

        let goal = engine.add_body(
            Body::rect(
                Vec2::new(config.width - unit.x / 2.0, config.height - unit.y / 2.0),
                unit * GOAL_SCALE,
                Tag::Goal,
            )
            .with_fill(Fill::Green),
        );

        let ball = engine.add_body(
            Body::circle(unit / 2.0, unit.min_element() * BALL_RADIUS_SCALE, Tag::Ball)
                .with_fill(Fill::Blue),
        );

        info!(
            "started {}x{} maze with {} walls",
            config.rows,
            config.cols,
            walls.len()
        );

        Ok(Self {
            config,
            grid,
            ball,
            goal,
            walls,
            won: false,
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ball(&self) -> BodyId {
        self.ball
    }

    pub fn goal(&self) -> BodyId {
        self.goal
    }

    pub fn walls(&self) -> &[BodyId] {
        &self.walls
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    /// Nudges the ball's current velocity along one axis.
    pub fn steer<E: Engine>(&self, engine: &mut E, direction: Direction) {
        let velocity = engine.velocity(self.ball);
        engine.set_velocity(self.ball, velocity + input::velocity_delta(direction));
    }

    /// Reacts to a collision-start event. Returns `true` if it won the game.
    pub fn on_collision<E: Engine>(&mut self, engine: &mut E, collision: &Collision) -> bool {
        if !is_winning_pair(collision.tag_a, collision.tag_b) {
            return false;
        }
        self.declare_win(engine)
    }

    /// One-way transition into the won state; later calls do nothing and return `false`.
    ///
    /// Turns gravity on and releases every maze wall so the board collapses.
    pub fn declare_win<E: Engine>(&mut self, engine: &mut E) -> bool {
        if self.won {
            return false;
        }
        self.won = true;
        engine.set_gravity(WIN_GRAVITY);
        for &wall in &self.walls {
            engine.set_static(wall, false);
        }
        info!("ball reached the goal, releasing {} walls", self.walls.len());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::World;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Engine double that records calls instead of simulating.
    #[derive(Default)]
    struct Recorder {
        bodies: Vec<Body>,
        gravity: Vec<Vec2>,
        released: Vec<BodyId>,
    }

    impl Engine for Recorder {
        fn add_body(&mut self, body: Body) -> BodyId {
            self.bodies.push(body);
            BodyId(self.bodies.len() - 1)
        }

        fn set_gravity(&mut self, gravity: Vec2) {
            self.gravity.push(gravity);
        }

        fn velocity(&self, id: BodyId) -> Vec2 {
            self.bodies[id.0].velocity
        }

        fn set_velocity(&mut self, id: BodyId, velocity: Vec2) {
            self.bodies[id.0].velocity = velocity;
        }

        fn set_static(&mut self, id: BodyId, is_static: bool) {
            self.bodies[id.0].is_static = is_static;
            if !is_static {
                self.released.push(id);
            }
        }

        fn tag(&self, id: BodyId) -> Tag {
            self.bodies[id.0].tag
        }

        fn step(&mut self) {}

        fn drain_collisions(&mut self) -> Vec<Collision> {
            Vec::new()
        }
    }

    fn config() -> MazeConfig {
        MazeConfig::new(4, 5, 500.0, 200.0).unwrap()
    }

    fn collision(tag_a: Tag, tag_b: Tag) -> Collision {
        Collision {
            a: BodyId(0),
            b: BodyId(1),
            tag_a,
            tag_b,
        }
    }

    #[test]
    fn winning_pair_is_ball_and_goal_in_any_order() {
        assert!(is_winning_pair(Tag::Ball, Tag::Goal));
        assert!(is_winning_pair(Tag::Goal, Tag::Ball));
        assert!(!is_winning_pair(Tag::Ball, Tag::Wall));
        assert!(!is_winning_pair(Tag::Ball, Tag::Ball));
        assert!(!is_winning_pair(Tag::Goal, Tag::Goal));
        assert!(!is_winning_pair(Tag::Wall, Tag::Boundary));
    }

    #[test]
    fn start_lays_out_every_body() {
        let mut engine = Recorder::default();
        let mut rng = StdRng::seed_from_u64(21);
        let session = GameSession::start(config(), &mut engine, &mut rng).unwrap();

        let grid = session.grid();
        assert!(grid.all_visited());
        let expected_walls = grid.interior_wall_count() - grid.open_count();
        assert_eq!(session.walls().len(), expected_walls);
        assert_eq!(engine.bodies.len(), 4 + expected_walls + 2);
        assert_eq!(engine.gravity, vec![Vec2::ZERO]);

        let boundary = engine.bodies.iter().filter(|b| b.tag == Tag::Boundary).count();
        assert_eq!(boundary, 4);
        assert!(session
            .walls()
            .iter()
            .all(|&id| engine.tag(id) == Tag::Wall && engine.bodies[id.0].is_static));

        let goal = &engine.bodies[session.goal().0];
        assert_eq!(goal.position, Vec2::new(450.0, 175.0));
        assert!(goal.is_static);
        assert_eq!(goal.fill, Fill::Green);

        let ball = &engine.bodies[session.ball().0];
        assert_eq!(ball.position, Vec2::new(50.0, 25.0));
        assert!(!ball.is_static);
        assert_eq!(ball.shape.half_extents(), Vec2::splat(12.5));
    }

    #[test]
    fn steering_adds_to_current_velocity() {
        let mut engine = Recorder::default();
        let mut rng = StdRng::seed_from_u64(2);
        let session = GameSession::start(config(), &mut engine, &mut rng).unwrap();
        let ball = session.ball();

        session.steer(&mut engine, Direction::Right);
        session.steer(&mut engine, Direction::Right);
        session.steer(&mut engine, Direction::Up);
        assert_eq!(engine.velocity(ball), Vec2::new(10.0, -5.0));

        session.steer(&mut engine, Direction::Left);
        session.steer(&mut engine, Direction::Down);
        assert_eq!(engine.velocity(ball), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn unrelated_collisions_do_not_win() {
        let mut engine = Recorder::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = GameSession::start(config(), &mut engine, &mut rng).unwrap();
        assert!(!session.on_collision(&mut engine, &collision(Tag::Ball, Tag::Wall)));
        assert!(!session.has_won());
        assert!(engine.released.is_empty());
    }

    #[test]
    fn win_releases_walls_once() {
        let mut engine = Recorder::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = GameSession::start(config(), &mut engine, &mut rng).unwrap();

        assert!(session.on_collision(&mut engine, &collision(Tag::Goal, Tag::Ball)));
        assert!(session.has_won());
        assert_eq!(engine.gravity.last(), Some(&WIN_GRAVITY));
        assert_eq!(engine.released, session.walls());
        assert!(engine.bodies[session.goal().0].is_static);
        assert!(engine
            .bodies
            .iter()
            .filter(|b| b.tag == Tag::Boundary)
            .all(|b| b.is_static));

        assert!(!session.on_collision(&mut engine, &collision(Tag::Ball, Tag::Goal)));
        assert!(!session.declare_win(&mut engine));
        assert_eq!(engine.released.len(), session.walls().len());
        assert_eq!(engine.gravity.len(), 2);
    }

    #[test]
    fn starts_on_the_builtin_world() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(8);
        let session = GameSession::start(config(), &mut world, &mut rng).unwrap();
        assert_eq!(world.gravity(), Vec2::ZERO);
        assert_eq!(world.tag(session.ball()), Tag::Ball);
        assert_eq!(world.tag(session.goal()), Tag::Goal);
    }

    #[test]
    fn same_seed_same_board() {
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        let a = GameSession::start(config(), &mut first, &mut StdRng::seed_from_u64(77)).unwrap();
        let b = GameSession::start(config(), &mut second, &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(first.bodies, second.bodies);
    }
}
