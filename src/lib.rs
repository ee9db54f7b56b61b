//! Irate Avians - a slingshot projectile game for the terminal
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `draw`: Abstract 2D drawing surface the sim renders into
//! - `level`: Level file loading
//! - `render`: Terminal implementation of the drawing surface

pub mod draw;
pub mod level;
pub mod render;
pub mod sim;

pub use level::Level;
pub use sim::{Arena, Outcome, Phase};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep, in world time units per frame
    pub const TIME_STEP: f32 = 0.2;
    /// Driving loop cadence (frames per second)
    pub const FRAME_RATE: u32 = 30;

    /// Downward acceleration on the bird (distance units per time unit squared)
    pub const GRAVITY: f32 = 0.25;
    /// Bird body radius
    pub const BIRD_RADIUS: f32 = 0.25;
    /// Slingshot anchor the bird launches from and resets to
    pub const LAUNCH_ANCHOR: Vec2 = Vec2::new(1.0, 1.0);
}
