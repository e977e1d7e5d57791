//! Presentation adapters around the interaction state machine.
//!
//! - `managed`: [`GradientEditor`] owns the value and reports it on change
//! - `controlled`: [`ControlledEditor`] leaves the value with the host and
//!   forwards every change through [`GradientEvents`]
//! - `layout`: [`HandleLayout`], the renderable handle positions for a frame

pub mod controlled;
pub mod layout;
pub mod managed;

pub use controlled::{ControlledEditor, ControlledProps, GradientEvents};
pub use layout::{ControlHandle, Guide, HandleLayout, Role, StopHandle};
pub use managed::{GradientEditor, NeighborColor, StopColorPolicy};
