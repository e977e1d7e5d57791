//! Track geometry: where stops live on screen
//!
//! Each gradient type has its own track shape that knows how to:
//! - Project a pixel position onto a gradient offset
//! - Place an offset back on screen
//! - Place and rotate the stop marker for an offset
//!
//! Linear and radial gradients share the straight A→B axis (radial stops are
//! radius fractions, the ellipse is only a visual guide). Sweep gradients
//! walk the ellipse spanned by A→B and A→C.

use std::f64::consts::TAU;

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use super::defaults::EPSILON;
use super::{safe_length, unit_perpendicular};
use crate::types::{ControlPoints, GradientType, Size};

/// A placed stop marker in pixels; `rotation` is in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StopMarker {
    pub position: DVec2,
    pub rotation: f64,
}

/// Common behavior for all track shapes (pixel space)
#[enum_dispatch]
pub trait Track {
    /// Offset of the pixel position `px` along the track, unclamped.
    fn position_at(&self, px: DVec2) -> f64;

    /// Pixel position of `offset` on the track.
    fn point_at(&self, offset: f64) -> DVec2;

    /// Stop marker placed `stop_offset_px` away from the track, perpendicular
    /// to it, rotated so its arrow points back at the track.
    fn marker_at(&self, offset: f64, stop_offset_px: f64) -> StopMarker;
}

/// The straight A→B track of linear and radial gradients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisTrack {
    pub from: DVec2,
    pub to: DVec2,
}

impl AxisTrack {
    /// Perpendicular to the axis, flipped to point "up" (`y ≤ 0`).
    pub fn outward(&self) -> DVec2 {
        let perp = unit_perpendicular(self.to - self.from);
        if perp.y > 0.0 { -perp } else { perp }
    }
}

impl Track for AxisTrack {
    fn position_at(&self, px: DVec2) -> f64 {
        let axis = self.to - self.from;
        let len = safe_length(axis);
        (px - self.from).dot(axis) / (len * len)
    }

    fn point_at(&self, offset: f64) -> DVec2 {
        self.from + (self.to - self.from) * offset
    }

    fn marker_at(&self, offset: f64, stop_offset_px: f64) -> StopMarker {
        let perp = self.outward();
        StopMarker {
            position: self.point_at(offset) + perp * stop_offset_px,
            rotation: (-perp.y).atan2(-perp.x).to_degrees() + 270.0,
        }
    }
}

/// The rotated ellipse track of sweep gradients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipseTrack {
    pub center: DVec2,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation of the ellipse (the A→B baseline angle), in radians
    pub rotation: f64,
}

impl Track for EllipseTrack {
    fn position_at(&self, px: DVec2) -> f64 {
        let d = px - self.center;
        let relative = (d.y.atan2(d.x) - self.rotation).rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if relative >= TAU { 0.0 } else { relative / TAU }
    }

    fn point_at(&self, offset: f64) -> DVec2 {
        let theta = offset * TAU;
        let local = dvec2(self.radius_x * theta.cos(), self.radius_y * theta.sin());
        self.center + DVec2::from_angle(self.rotation).rotate(local)
    }

    fn marker_at(&self, offset: f64, stop_offset_px: f64) -> StopMarker {
        let rotation = ellipse_marker_rotation(
            self.radius_x,
            self.radius_y,
            offset * 360.0,
            self.rotation.to_degrees(),
        );
        let normal = DVec2::from_angle((rotation - 90.0).to_radians());
        StopMarker {
            position: self.point_at(offset) + normal * stop_offset_px,
            rotation,
        }
    }
}

/// Marker rotation (degrees) at parametric angle `theta_deg` of an ellipse
/// with radii `rx`/`ry` rotated by `rotation_deg`.
///
/// The outward normal of `(rx·cos θ, ry·sin θ)` points along
/// `(cos θ / rx, sin θ / ry)`; the marker is turned a quarter past it.
pub fn ellipse_marker_rotation(rx: f64, ry: f64, theta_deg: f64, rotation_deg: f64) -> f64 {
    let theta = theta_deg.to_radians();
    let normal = (theta.sin() / ry.max(EPSILON)).atan2(theta.cos() / rx.max(EPSILON));
    normal.to_degrees() + rotation_deg + 90.0
}

/// A track shape wrapping all track types
#[enum_dispatch(Track)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackShape {
    Axis(AxisTrack),
    Ellipse(EllipseTrack),
}

impl TrackShape {
    /// Build the pixel-space track for `kind` from relative control points.
    pub fn new(kind: GradientType, points: &ControlPoints, size: Size) -> Self {
        let px = points.to_px(size);
        match kind {
            GradientType::Linear | GradientType::Radial => AxisTrack {
                from: px.a,
                to: px.b,
            }
            .into(),
            GradientType::Sweep => {
                let axis = px.b - px.a;
                EllipseTrack {
                    center: px.a,
                    radius_x: axis.length(),
                    radius_y: (px.c - px.a).length(),
                    rotation: axis.y.atan2(axis.x),
                }
                .into()
            }
        }
    }
}

/// Offset of the pixel position `(x, y)`; unclamped, the caller clamps.
pub fn screen_to_gradient_position(
    x: f64,
    y: f64,
    kind: GradientType,
    points: &ControlPoints,
    size: Size,
) -> f64 {
    TrackShape::new(kind, points, size).position_at(dvec2(x, y))
}

/// Pixel position of `offset`; exact inverse of
/// [`screen_to_gradient_position`] on the track.
pub fn gradient_position_to_screen(
    offset: f64,
    kind: GradientType,
    points: &ControlPoints,
    size: Size,
) -> DVec2 {
    TrackShape::new(kind, points, size).point_at(offset)
}

/// Stop marker for `offset`, `stop_offset_px` away from the track.
pub fn stop_marker_transform(
    offset: f64,
    kind: GradientType,
    points: &ControlPoints,
    size: Size,
    stop_offset_px: f64,
) -> StopMarker {
    TrackShape::new(kind, points, size).marker_at(offset, stop_offset_px)
}
