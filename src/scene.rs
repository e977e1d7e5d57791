//! A borrowed view of everything the hit-tester and the state machine read.

use glam::DVec2;

use crate::geometry::{StopMarker, Track, TrackShape};
use crate::types::{Control, ControlPoints, GradientStop, GradientType, Size};

/// Gradient geometry and stops as currently shown in the editor.
///
/// Managed editors borrow their own state; controlled editors build one from
/// the host's props on every event.
#[derive(Debug)]
pub struct Scene<'a, C> {
    pub kind: GradientType,
    pub size: Size,
    pub points: &'a ControlPoints,
    pub stops: &'a [GradientStop<C>],
}

impl<C> Clone for Scene<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Scene<'_, C> {}

impl<'a, C> Scene<'a, C> {
    pub fn new(
        kind: GradientType,
        size: Size,
        points: &'a ControlPoints,
        stops: &'a [GradientStop<C>],
    ) -> Self {
        Scene {
            kind,
            size,
            points,
            stops,
        }
    }

    pub fn track(&self) -> TrackShape {
        TrackShape::new(self.kind, self.points, self.size)
    }

    /// Pixel position of a control handle.
    pub fn control_px(&self, which: Control) -> DVec2 {
        self.size.to_px(self.points.get(which))
    }

    /// Marker of the stop at `index`, if it exists.
    pub fn stop_marker(&self, index: usize, stop_offset_px: f64) -> Option<StopMarker> {
        let stop = self.stops.get(index)?;
        Some(self.track().marker_at(stop.offset, stop_offset_px))
    }
}
