//! Geometry and interaction engine for on-canvas gradient editing.
//!
//! A gradient is placed by an affine transform and edited through two or
//! three control points (`A`, `B`, `C`) plus a list of color stops. This
//! crate keeps the transform, the screen-space handles and the stop list
//! consistent:
//!
//! - [`geometry`]: transform ⇄ control points, screen ⇄ gradient offset,
//!   stop marker placement
//! - [`hit`]: what is under the pointer
//! - [`stops`]: sorted insertion, stable re-sort, deletion
//! - [`editor`]: the interaction state machine
//! - [`adapter`]: managed and controlled editors plus handle layout
//! - [`script`]: replayable session scripts
//!
//! Colors are opaque: every stop carries a `C` the crate never inspects.

pub mod adapter;
pub mod config;
pub mod editor;
pub mod errors;
pub mod geometry;
pub mod hit;
pub mod log;
pub mod scene;
pub mod script;
pub mod stops;
pub mod types;

pub use adapter::{
    ControlledEditor, ControlledProps, GradientEditor, GradientEvents, HandleLayout, NeighborColor,
    StopColorPolicy,
};
pub use config::EditorConfig;
pub use editor::{Action, DragState, Effect, Focus, HoverPreview, Interaction, PointerCapture};
pub use errors::{ParseGradientTypeError, ScriptError, SizeError, ValueError};
pub use geometry::{
    base_anchors, gradient_position_to_screen, points_to_transform, screen_to_gradient_position,
    stop_marker_transform, transform_to_points,
};
pub use hit::{Hit, detect_hit_target};
pub use scene::Scene;
pub use script::Session;
pub use types::{
    AffineTransform, Control, ControlPoints, GradientStop, GradientType, GradientValue, Point, Size,
};
