//! Perfect-maze ball game for the terminal.
//!
//! A randomized depth-first carve produces the maze ([`carver`]), closed passages become
//! wall bodies ([`walls`]) in an [`engine::Engine`], and a [`session::GameSession`]
//! watches for the ball reaching the goal.

pub mod carver;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod input;
pub mod physics;
pub mod render;
pub mod session;
pub mod shuffle;
pub mod walls;
