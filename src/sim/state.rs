//! Arena entities and game state
//!
//! `Arena` exclusively owns the bird and all targets. Nothing outside the
//! sim mutates entity fields directly; every state change goes through an
//! intent-revealing operation, and the tick function in `tick.rs` is the
//! only driver.

use glam::Vec2;

use super::collision::circles_overlap;
use crate::consts::{BIRD_RADIUS, GRAVITY, LAUNCH_ANCHOR};
use crate::draw::{palette, DrawSurface};
use crate::level::Level;

/// Which half of the input/physics loop the arena is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Listening for the player's drag; the bird sits on the anchor
    Aiming,
    /// The bird is in ballistic flight
    Flying,
}

/// Terminal game result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// A drifting, screen-wrapping circular obstacle with hit points
///
/// A target whose hit points reach zero is inert: it is neither drawn nor
/// collision-tested, but it persists in the arena for the rest of the run.
#[derive(Debug, Clone)]
pub struct Target {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    hit_points: u32,
    hit_this_throw: bool,
    /// Field extents used as wrap bounds
    bounds: Vec2,
}

impl Target {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, hit_points: u32, bounds: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius,
            hit_points,
            hit_this_throw: false,
            bounds,
        }
    }

    /// Advance by one timestep, wrapping independently per axis once the
    /// target is fully offscreen on that axis. Off the low side it reappears
    /// just past the high side (`dim + r`) and vice versa (`r`). A partially
    /// offscreen target does not wrap. Wrapping never alters velocity.
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;

        let r = self.radius;
        if self.pos.x + r < 0.0 {
            self.pos.x = self.bounds.x + r;
        } else if self.pos.x - r > self.bounds.x {
            self.pos.x = r;
        }
        if self.pos.y + r < 0.0 {
            self.pos.y = self.bounds.y + r;
        } else if self.pos.y - r > self.bounds.y {
            self.pos.y = r;
        }
    }

    /// Flag this target as struck during the current throw. Does not touch
    /// hit points: damage is applied once at throw resolution, so N contact
    /// frames in one throw still cost exactly one hit point.
    pub fn mark_hit(&mut self) {
        self.hit_this_throw = true;
    }

    pub fn hit_this_throw(&self) -> bool {
        self.hit_this_throw
    }

    pub(crate) fn clear_hit(&mut self) {
        self.hit_this_throw = false;
    }

    /// Apply one throw's worth of damage.
    pub fn absorb_hit(&mut self) {
        self.hit_points = self.hit_points.saturating_sub(1);
    }

    /// An inert (zero HP) target is skipped by drawing and collision.
    pub fn is_active(&self) -> bool {
        self.hit_points > 0
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    fn draw(&self, surface: &mut dyn DrawSurface) {
        if !self.is_active() {
            return;
        }
        surface.filled_circle(self.pos, self.radius, palette::TARGET);
        surface.text(self.pos, &self.hit_points.to_string(), palette::LABEL);
    }
}

/// The single player-controlled projectile
#[derive(Debug, Clone)]
pub struct Bird {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    throws_remaining: u32,
}

impl Bird {
    fn new(throws: u32) -> Self {
        Self {
            pos: LAUNCH_ANCHOR,
            vel: Vec2::ZERO,
            radius: BIRD_RADIUS,
            throws_remaining: throws,
        }
    }

    /// Recompute the pending launch velocity from the live pointer: the
    /// vector from the pointer back to the bird (slingshot pull-back, so a
    /// farther drag launches faster, opposite the drag direction).
    pub fn aim_from_pointer(&mut self, pointer: Vec2) {
        self.vel = self.pos - pointer;
    }

    /// One timestep of ballistic flight: inertia plus gravity. Horizontal
    /// velocity is constant for the whole flight.
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel.y -= GRAVITY * dt;
    }

    /// Mark `target` if the bird currently overlaps it. The bird passes
    /// through: its own velocity is never affected by contact.
    pub fn strike(&self, target: &mut Target) {
        if target.is_active()
            && circles_overlap(self.pos, self.radius, target.pos(), target.radius())
        {
            target.mark_hit();
        }
    }

    /// Return to the launch anchor with zero velocity.
    pub fn reset(&mut self) {
        self.pos = LAUNCH_ANCHOR;
        self.vel = Vec2::ZERO;
    }

    pub fn consume_throw(&mut self) {
        self.throws_remaining = self.throws_remaining.saturating_sub(1);
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn throws_remaining(&self) -> u32 {
        self.throws_remaining
    }

    fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.filled_circle(self.pos, self.radius, palette::BIRD_BODY);

        // Eyes and beak, sized relative to the fixed body radius.
        surface.filled_circle(self.pos + Vec2::new(-0.05, 0.05), 0.05, palette::BIRD_EYE);
        surface.filled_circle(self.pos + Vec2::new(0.05, 0.05), 0.05, palette::BIRD_EYE);
        surface.filled_polygon(
            &[
                self.pos + Vec2::new(-0.025, 0.025),
                self.pos + Vec2::new(0.025, 0.025),
                self.pos + Vec2::new(0.0, -0.05),
            ],
            palette::BIRD_BEAK,
        );

        surface.text(
            self.pos + Vec2::new(0.0, self.radius + 0.1),
            &self.throws_remaining.to_string(),
            palette::LABEL,
        );
    }

    /// Preview the launch velocity as a line while the player drags.
    fn draw_aim_line(&self, surface: &mut dyn DrawSurface) {
        surface.line(self.pos, self.pos + self.vel, palette::AIM_LINE);
    }
}

/// The bounded play-field: owns the bird, all targets, and the phase
#[derive(Debug, Clone)]
pub struct Arena {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) bird: Bird,
    pub(crate) targets: Vec<Target>,
    pub(crate) phase: Phase,
    /// Press-to-release edge detector; only meaningful while aiming.
    pub(crate) drag_active: bool,
}

impl Arena {
    /// Build an arena from parsed level data. Infallible: validation is the
    /// loader's job.
    pub fn new(level: &Level) -> Self {
        let bounds = Vec2::new(level.width, level.height);
        let targets = level
            .targets
            .iter()
            .map(|spec| Target::new(spec.pos, spec.vel, spec.radius, spec.hit_points, bounds))
            .collect();

        Self {
            width: level.width,
            height: level.height,
            bird: Bird::new(level.throws),
            targets,
            phase: Phase::Aiming,
            drag_active: false,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Win/lose check, queried by the driver before each tick.
    ///
    /// Won when every target is inert; with zero targets this is vacuously
    /// true, so an empty level is already cleared (intentional). Lost only
    /// while AIMING with an exhausted throw budget: a lose check never fires
    /// mid-flight, so the final bird always gets to land its last hit.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.targets.iter().all(|t| !t.is_active()) {
            return Some(Outcome::Won);
        }
        if self.phase == Phase::Aiming && self.bird.throws_remaining() == 0 {
            return Some(Outcome::Lost);
        }
        None
    }

    /// One-time surface setup: map the surface onto the field extents.
    pub fn configure_surface(&self, surface: &mut dyn DrawSurface) {
        surface.set_world_scale(self.width, self.height);
    }

    /// Emit one frame: every live target, the bird, and the aim preview
    /// line while a drag is in progress.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.clear();

        for target in &self.targets {
            target.draw(surface);
        }
        self.bird.draw(surface);

        if self.phase == Phase::Aiming && self.drag_active {
            self.bird.draw_aim_line(surface);
        }
    }

    /// Emit the terminal win/lose screen.
    pub fn draw_outcome(&self, surface: &mut dyn DrawSurface, outcome: Outcome) {
        surface.clear();
        let pos = Vec2::new(self.width / 2.0, 3.0 * self.height / 4.0);
        match outcome {
            Outcome::Won => surface.text(pos, "You Win!", palette::WIN),
            Outcome::Lost => surface.text(pos, "You Lose!", palette::LOSE),
        }
    }
}
