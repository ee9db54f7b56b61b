//! Fixed timestep tick: the aiming/flight state machine
//!
//! One `tick` call advances the whole arena by `dt`. Input is polled, not
//! event-pushed: the driver hands in the pointer state it observed this
//! frame and the tick decides what it means.

use glam::Vec2;

use super::state::{Arena, Phase};

/// Polled pointer state for one tick, in world coordinates
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub pressed: bool,
    pub pos: Vec2,
}

/// Advance the arena by one fixed timestep.
///
/// Transition priority while AIMING:
/// 1. pointer pressed: remember the drag and keep recomputing the bird's
///    pending launch velocity (preview only, nothing committed);
/// 2. pointer released after a drag (press-to-release edge): commit the
///    throw, consume one from the budget, enter FLYING.
///
/// While FLYING the bird advances, every active target is collision-tested,
/// and once the bird leaves the field the throw resolves back to AIMING.
pub fn tick(arena: &mut Arena, pointer: &PointerState, dt: f32) {
    // Targets drift every tick in both phases, even while the player aims.
    for target in &mut arena.targets {
        target.advance(dt);
    }

    match arena.phase {
        Phase::Aiming => {
            if pointer.pressed {
                arena.drag_active = true;
                arena.bird.aim_from_pointer(pointer.pos);
            } else if arena.drag_active {
                arena.drag_active = false;
                arena.bird.consume_throw();
                arena.phase = Phase::Flying;
                log::debug!(
                    "throw committed at velocity {}, {} remaining",
                    arena.bird.vel(),
                    arena.bird.throws_remaining()
                );
            }
        }
        Phase::Flying => {
            arena.bird.advance(dt);
            for target in &mut arena.targets {
                arena.bird.strike(target);
            }
            if bird_left_field(arena) {
                resolve_throw(arena);
            }
        }
    }
}

/// The bird has fully left the field below, to the left, or to the right.
/// The top is unbounded: a bird above the field stays in flight until
/// gravity brings it back down or it drifts off a side.
fn bird_left_field(arena: &Arena) -> bool {
    let pos = arena.bird.pos();
    let r = arena.bird.radius();
    pos.y + r < 0.0 || pos.x + r < 0.0 || pos.x - r > arena.width
}

/// End of a throw: every target struck during it absorbs exactly one hit,
/// the flags clear, the bird returns to the anchor, and aiming resumes.
fn resolve_throw(arena: &mut Arena) {
    for target in &mut arena.targets {
        if target.hit_this_throw() {
            target.absorb_hit();
            target.clear_hit();
            log::debug!(
                "target at {} absorbed a hit, {} HP left",
                target.pos(),
                target.hit_points()
            );
        }
    }
    arena.bird.reset();
    arena.phase = Phase::Aiming;
}
