//! Default sizes and thresholds (pixels unless noted otherwise)

/// Guard for near-zero denominators (axis lengths, determinants).
pub const EPSILON: f64 = 1e-6;
/// Distance between the track and a stop marker's center.
pub const STOP_OFFSET_PX: f64 = 25.0;
/// Visual size of a stop marker.
pub const STOP_SIZE_PX: f64 = 18.0;
/// Extra stop hit padding, as a fraction of the editor's smaller side.
pub const STOP_PADDING_RATIO: f64 = 0.012;
/// Control hit radius, as a fraction of the editor's smaller side.
pub const CONTROL_RADIUS_RATIO: f64 = 0.02;
/// Track hit tolerance for linear and radial gradients.
pub const TRACK_RATIO: f64 = 0.0375;
/// Track hit tolerance for sweep gradients (elliptical track).
pub const SWEEP_TRACK_RATIO: f64 = 0.05;
