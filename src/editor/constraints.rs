//! Control drag coupling.
//!
//! For radial and sweep gradients the ellipse axes stay orthogonal: moving
//! `B` re-places `C` perpendicular to the new A→B axis at its old distance,
//! moving `A` does the same but scales that distance with the A→B length,
//! and `C` itself can only slide along the perpendicular. Linear gradients
//! move the dragged point freely; their `C` is cosmetic.

use glam::DVec2;

use crate::geometry::{points_to_transform, safe_length, unit_perpendicular};
use crate::types::{AffineTransform, Control, ControlPoints, GradientType, Point};

/// Move `which` by the relative delta `delta` and apply the coupling for
/// `kind`.
pub fn drag_control(
    points: &ControlPoints,
    which: Control,
    delta: DVec2,
    kind: GradientType,
) -> ControlPoints {
    let mut next = *points;
    if kind == GradientType::Linear {
        *next.get_mut(which) += delta;
        return next;
    }

    match which {
        Control::A => {
            next.a = points.a + delta;
            let ratio = safe_length(next.b - next.a) / safe_length(points.axis());
            next.c = keep_perpendicular(points, next.a, next.b, ratio);
        }
        Control::B => {
            next.b = points.b + delta;
            next.c = keep_perpendicular(points, next.a, next.b, 1.0);
        }
        Control::C => {
            let perp = unit_perpendicular(points.axis());
            let current = (points.c - points.a).dot(perp);
            next.c = points.a + perp * (current + delta.dot(perp));
        }
    }
    next
}

/// `C` for the new axis `a → b`: perpendicular to it, at the old `|AC|`
/// times `scale`, on the same side as before.
fn keep_perpendicular(old: &ControlPoints, a: Point, b: Point, scale: f64) -> Point {
    let to_c = old.c - old.a;
    let side = if to_c.dot(old.axis().perp()) < 0.0 { -1.0 } else { 1.0 };
    a + unit_perpendicular(b - a) * (to_c.length() * scale * side)
}

/// Whether moving `which` changes the persisted transform.
pub fn solves_transform(kind: GradientType, which: Control) -> bool {
    !(kind.synthesizes_c() && which == Control::C)
}

/// Apply a control drag and, unless the move is cosmetic, solve the new
/// transform.
pub fn drag_and_solve(
    points: &ControlPoints,
    which: Control,
    delta: DVec2,
    kind: GradientType,
) -> (ControlPoints, Option<AffineTransform>) {
    let next = drag_control(points, which, delta, kind);
    let transform = solves_transform(kind, which).then(|| points_to_transform(&next, kind));
    (next, transform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::base_anchors;
    use glam::dvec2;

    fn assert_close(actual: Point, expected: Point) {
        assert!(actual.abs_diff_eq(expected, 1e-9), "expected {expected:?}, got {actual:?}");
    }

    #[test]
    fn radial_b_keeps_c_perpendicular_at_same_distance() {
        let points = base_anchors(GradientType::Radial);
        // rotate B a quarter turn around A: (1, .5) -> (.5, 1)
        let next = drag_control(&points, Control::B, dvec2(-0.5, 0.5), GradientType::Radial);
        assert_close(next.b, dvec2(0.5, 1.0));
        assert!((next.c - next.a).dot(next.axis()).abs() < 1e-9);
        assert!(((next.c - next.a).length() - 0.5).abs() < 1e-9);
        assert_close(next.c, dvec2(0.0, 0.5));
    }

    #[test]
    fn radial_a_keeps_c_perpendicular() {
        let points = base_anchors(GradientType::Sweep);
        let next = drag_control(&points, Control::A, dvec2(0.0, -0.5), GradientType::Sweep);
        assert_close(next.a, dvec2(0.5, 0.0));
        assert!((next.c - next.a).dot(next.axis()).abs() < 1e-9);
        // |AB| grew from 0.5 to √0.5, |AC| grows by the same ratio
        assert!(((next.c - next.a).length() - 0.5_f64.sqrt()).abs() < 1e-9);
        assert_close(next.c, dvec2(0.0, 0.5));
    }

    #[test]
    fn a_drag_keeps_the_axis_ratio() {
        let points = base_anchors(GradientType::Radial);
        // halve |AB| by moving A toward B: (.5, .5) -> (.75, .5)
        let next = drag_control(&points, Control::A, dvec2(0.25, 0.0), GradientType::Radial);
        assert_close(next.c, dvec2(0.75, 0.75));
        let before = (points.c - points.a).length() / points.axis().length();
        let after = (next.c - next.a).length() / next.axis().length();
        assert!((before - after).abs() < 1e-9);
    }

    #[test]
    fn radial_c_only_slides_along_perpendicular() {
        let points = base_anchors(GradientType::Radial);
        // sideways component is dropped, perpendicular component applied
        let next = drag_control(&points, Control::C, dvec2(0.3, -0.2), GradientType::Radial);
        assert_close(next.c, dvec2(0.5, 0.8));
        assert_eq!(next.a, points.a);
        assert_eq!(next.b, points.b);
    }

    #[test]
    fn c_dragged_through_a_stays_on_its_new_side() {
        let points = base_anchors(GradientType::Radial);
        let flipped = drag_control(&points, Control::C, dvec2(0.0, -0.7), GradientType::Radial);
        assert_close(flipped.c, dvec2(0.5, 0.3));
        let next = drag_control(&flipped, Control::B, dvec2(0.1, 0.0), GradientType::Radial);
        assert_close(next.c, dvec2(0.5, 0.3));
    }

    #[test]
    fn linear_c_is_cosmetic() {
        let points = base_anchors(GradientType::Linear);
        let (next, transform) =
            drag_and_solve(&points, Control::C, dvec2(0.1, 0.1), GradientType::Linear);
        assert_close(next.c, dvec2(0.1, 1.1));
        assert_eq!(transform, None);

        let (_, transform) =
            drag_and_solve(&points, Control::B, dvec2(0.1, 0.0), GradientType::Linear);
        assert!(transform.is_some());
    }
}
