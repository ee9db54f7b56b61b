//! Deterministic simulation module
//!
//! All gameplay logic lives here. The module is pure and headless:
//! - Fixed timestep only
//! - No randomness
//! - No terminal or platform dependencies (drawing goes through the
//!   `DrawSurface` trait)

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::circles_overlap;
pub use state::{Arena, Bird, Outcome, Phase, Target};
pub use tick::{tick, PointerState};
