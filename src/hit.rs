//! Hit-testing: what is under the pointer?
//!
//! Priority order, first match wins: control `A`, `B`, `C` (not for linear,
//! where `C` is synthesized), stop markers in array order, then the track.

use glam::DVec2;

use crate::config::EditorConfig;
use crate::geometry::Track;
use crate::scene::Scene;
use crate::types::{Control, GradientType};

/// Result of a hit test. `distance` is the pixel distance between the
/// pointer and the thing that was hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hit {
    Control { which: Control, distance: f64 },
    Stop { index: usize, distance: f64 },
    Track { offset: f64, distance: f64 },
}

impl Hit {
    pub fn distance(&self) -> f64 {
        match *self {
            Hit::Control { distance, .. }
            | Hit::Stop { distance, .. }
            | Hit::Track { distance, .. } => distance,
        }
    }
}

/// Classify the pixel position `pointer` against the scene.
pub fn detect_hit_target<C>(
    pointer: DVec2,
    scene: &Scene<'_, C>,
    config: &EditorConfig,
) -> Option<Hit> {
    debug_assert!(pointer.is_finite(), "host delivered a non-finite pointer: {pointer:?}");

    let control_radius = config.control_radius(scene.size);
    for which in Control::ALL {
        if which == Control::C && scene.kind == GradientType::Linear {
            continue;
        }
        let distance = pointer.distance(scene.control_px(which));
        if distance < control_radius {
            return Some(Hit::Control { which, distance });
        }
    }

    let track = scene.track();
    let stop_radius = config.stop_radius(scene.size);
    for (index, stop) in scene.stops.iter().enumerate() {
        let marker = track.marker_at(stop.offset, config.stop_offset_px);
        let distance = pointer.distance(marker.position);
        if distance < stop_radius {
            return Some(Hit::Stop { index, distance });
        }
    }

    let offset = track.position_at(pointer);
    let distance = pointer.distance(track.point_at(offset));
    if distance < config.track_threshold(scene.kind, scene.size) && (0.0..=1.0).contains(&offset) {
        return Some(Hit::Track { offset, distance });
    }

    None
}
