use std::fs::File;
use std::io::{self, Stdout};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use maze_ball::config::Args;
use maze_ball::engine::Engine;
use maze_ball::error::{MazeError, Result};
use maze_ball::input::{self, Action};
use maze_ball::physics::World;
use maze_ball::render::Renderer;
use maze_ball::session::GameSession;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    info!("starting with {args:?}");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &args);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

/// The game owns stdout, so logs only go somewhere when a file is given.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| MazeError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn new_round(args: &Args, rng: &mut StdRng) -> Result<(World, GameSession)> {
    let (term_w, term_h) = terminal::size()?;
    let config = args.maze_config((term_w, term_h.saturating_sub(1)))?;
    let mut world = World::new();
    let session = GameSession::start(config, &mut world, rng)?;
    Ok((world, session))
}

fn run(stdout: &mut Stdout, args: &Args) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (mut world, mut session) = new_round(args, &mut rng)?;
    let mut renderer = Renderer::new();
    let tick = Duration::from_millis(args.tick_ms());
    let frame_time = Duration::from_micros(1_000_000 / args.fps());
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => match input::action_for(key) {
                    Some(Action::Quit) => return Ok(()),
                    Some(Action::Regenerate) => {
                        (world, session) = new_round(args, &mut rng)?;
                        renderer.invalidate();
                    }
                    Some(Action::Steer(direction)) => session.steer(&mut world, direction),
                    None => {}
                },
                Event::Resize(..) => renderer.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            world.step();
            for collision in world.drain_collisions() {
                session.on_collision(&mut world, &collision);
            }
        }
        renderer.render(stdout, world.bodies(), &session)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
