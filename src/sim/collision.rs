//! Circle overlap test for bird/target contact

use glam::Vec2;

/// True when two circles overlap. Strict: circles that merely touch
/// (distance exactly equal to the radius sum) do not count as overlapping.
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_circles_are_detected() {
        assert!(circles_overlap(
            Vec2::new(0.0, 0.0),
            1.0,
            Vec2::new(1.5, 0.0),
            1.0
        ));
    }

    #[test]
    fn touching_circles_do_not_overlap() {
        // Centers exactly two radii apart.
        assert!(!circles_overlap(
            Vec2::new(0.0, 0.0),
            1.0,
            Vec2::new(2.0, 0.0),
            1.0
        ));
    }

    #[test]
    fn distant_circles_do_not_overlap() {
        assert!(!circles_overlap(
            Vec2::new(0.0, 0.0),
            0.25,
            Vec2::new(5.0, 5.0),
            0.5
        ));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Vec2::new(2.0, 3.0);
        let b = Vec2::new(2.4, 3.1);
        assert_eq!(
            circles_overlap(a, 0.3, b, 0.2),
            circles_overlap(b, 0.2, a, 0.3)
        );
    }
}
