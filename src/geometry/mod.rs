//! Geometry kernel: pure coordinate math for gradient editing
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and thresholds
//! - `track`: Screen ↔ gradient-position mapping and stop marker placement
//!
//! The functions here convert between the three representations of a
//! gradient's placement: the persisted [`AffineTransform`], the derived
//! [`ControlPoints`] and pixel positions on screen.

pub mod defaults;
pub mod track;

pub use track::{
    AxisTrack, EllipseTrack, StopMarker, Track, TrackShape, ellipse_marker_rotation,
    gradient_position_to_screen, screen_to_gradient_position, stop_marker_transform,
};

use glam::{DVec2, dvec2};

use crate::types::{AffineTransform, ControlPoints, GradientType, Point};
use defaults::EPSILON;

/// Base anchors: where A, B and C sit under the identity transform.
pub fn base_anchors(kind: GradientType) -> ControlPoints {
    match kind {
        GradientType::Linear => {
            ControlPoints::new(dvec2(0.0, 0.5), dvec2(1.0, 0.5), dvec2(0.0, 1.0))
        }
        // radial and sweep share the same anchors
        GradientType::Radial | GradientType::Sweep => {
            ControlPoints::new(dvec2(0.5, 0.5), dvec2(1.0, 0.5), dvec2(0.5, 1.0))
        }
    }
}

/// Length of `v`, never below [`EPSILON`].
#[inline]
pub(crate) fn safe_length(v: DVec2) -> f64 {
    v.length().max(EPSILON)
}

/// Replace a near-zero denominator with `±EPSILON`, keeping its sign.
#[inline]
pub(crate) fn guard_denominator(value: f64) -> f64 {
    if value.abs() < EPSILON {
        EPSILON.copysign(value)
    } else {
        value
    }
}

/// Unit vector perpendicular to `axis`, rotated +90° (`(-dy, dx)`).
#[inline]
pub fn unit_perpendicular(axis: DVec2) -> DVec2 {
    axis.perp() / safe_length(axis)
}

/// The synthesized linear `C`: half the A→B length from `A`, perpendicular
/// to A→B.
pub fn synthesize_linear_c(a: Point, b: Point) -> Point {
    let axis = b - a;
    let len = safe_length(axis);
    a + unit_perpendicular(axis) * (len * 0.5)
}

/// Apply `t` to the base anchors of `kind`.
///
/// For linear gradients the transform-derived `C` is discarded and
/// synthesized from A and B.
pub fn transform_to_points(t: &AffineTransform, kind: GradientType) -> ControlPoints {
    let base = base_anchors(kind);
    let a = t.apply(base.a);
    let b = t.apply(base.b);
    let c = match kind {
        GradientType::Linear => synthesize_linear_c(a, b),
        GradientType::Radial | GradientType::Sweep => t.apply(base.c),
    };
    ControlPoints::new(a, b, c)
}

/// Solve the affine transform that maps the base anchors of `kind` onto
/// `points`.
///
/// This is the unique affine map taking three point correspondences to
/// three targets. For linear gradients `C` is synthesized before solving,
/// so only A and B carry information.
pub fn points_to_transform(points: &ControlPoints, kind: GradientType) -> AffineTransform {
    let base = base_anchors(kind);
    let target_c = match kind {
        GradientType::Linear => synthesize_linear_c(points.a, points.b),
        GradientType::Radial | GradientType::Sweep => points.c,
    };

    let u = base.b - base.a;
    let v = base.c - base.a;
    let p = points.b - points.a;
    let q = target_c - points.a;

    let det = guard_denominator(u.x * v.y - u.y * v.x);

    let a = (p.x * v.y - q.x * u.y) / det;
    let b = (q.x * u.x - p.x * v.x) / det;
    let d = (p.y * v.y - q.y * u.y) / det;
    let e = (q.y * u.x - p.y * v.x) / det;

    // translate so that base A lands on target A
    let tx = points.a.x - a * base.a.x - b * base.a.y;
    let ty = points.a.y - d * base.a.x - e * base.a.y;

    AffineTransform::new(a, b, tx, d, e, ty)
}
