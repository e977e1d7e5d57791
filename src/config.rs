//! Editor configuration: marker sizes, hit thresholds and readonly mode.

use crate::geometry::defaults;
use crate::types::{GradientType, Size};

/// Tunables for hit-testing and marker placement.
///
/// Ratios are fractions of the editor's smaller side so that hit areas scale
/// with the editor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorConfig {
    pub stop_offset_px: f64,
    pub stop_size_px: f64,
    pub stop_padding_ratio: f64,
    pub control_radius_ratio: f64,
    /// Fixed control hit radius; overrides `control_radius_ratio` when set.
    pub control_radius_px: Option<f64>,
    pub track_ratio: f64,
    pub sweep_track_ratio: f64,
    pub readonly: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            stop_offset_px: defaults::STOP_OFFSET_PX,
            stop_size_px: defaults::STOP_SIZE_PX,
            stop_padding_ratio: defaults::STOP_PADDING_RATIO,
            control_radius_ratio: defaults::CONTROL_RADIUS_RATIO,
            control_radius_px: None,
            track_ratio: defaults::TRACK_RATIO,
            sweep_track_ratio: defaults::SWEEP_TRACK_RATIO,
            readonly: false,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stop_offset(mut self, px: f64) -> Self {
        self.stop_offset_px = px;
        self
    }

    pub fn with_stop_size(mut self, px: f64) -> Self {
        self.stop_size_px = px;
        self
    }

    pub fn with_control_radius(mut self, px: f64) -> Self {
        self.control_radius_px = Some(px);
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Pixel radius within which a control handle is hit.
    pub fn control_radius(&self, size: Size) -> f64 {
        self.control_radius_px
            .unwrap_or_else(|| size.min_side() * self.control_radius_ratio)
    }

    /// Pixel radius within which a stop marker is hit.
    pub fn stop_radius(&self, size: Size) -> f64 {
        self.stop_size_px / 2.0 + size.min_side() * self.stop_padding_ratio
    }

    /// Maximum pixel distance from the track for a track hit.
    pub fn track_threshold(&self, kind: GradientType, size: Size) -> f64 {
        let ratio = match kind {
            GradientType::Sweep => self.sweep_track_ratio,
            GradientType::Linear | GradientType::Radial => self.track_ratio,
        };
        size.min_side() * ratio
    }
}
