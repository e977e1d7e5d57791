//! Interaction state: drag, focus, hover preview, and the actions and
//! effects that flow through the state machine.

use glam::DVec2;

use crate::geometry::StopMarker;
use crate::types::{AffineTransform, Control, ControlPoints};

/// The drag in flight, if any. At most one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DragState {
    #[default]
    None,
    /// Dragging a control handle; `pointer_offset` is pointer minus handle
    /// at pointer-down, in pixels.
    Control { which: Control, pointer_offset: DVec2 },
    /// Dragging the stop at `index`; `pointer_offset` is pointer minus
    /// marker at pointer-down, in pixels.
    Stop { index: usize, pointer_offset: DVec2 },
}

impl DragState {
    pub fn is_active(&self) -> bool {
        !matches!(self, DragState::None)
    }
}

/// Keyboard/selection focus. Focusing a stop clears control focus and vice
/// versa.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Stop(usize),
    Control(Control),
}

impl Focus {
    pub fn stop(self) -> Option<usize> {
        match self {
            Focus::Stop(index) => Some(index),
            _ => None,
        }
    }

    pub fn control(self) -> Option<Control> {
        match self {
            Focus::Control(which) => Some(which),
            _ => None,
        }
    }
}

impl From<Option<usize>> for Focus {
    fn from(stop: Option<usize>) -> Self {
        stop.map_or(Focus::None, Focus::Stop)
    }
}

impl From<Option<Control>> for Focus {
    fn from(control: Option<Control>) -> Self {
        control.map_or(Focus::None, Focus::Control)
    }
}

/// Ghost stop shown under the cursor while hovering the track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverPreview {
    pub offset: f64,
    /// Marker center in pixels
    pub position: DVec2,
    /// Marker rotation in degrees
    pub rotation: f64,
}

impl HoverPreview {
    pub fn new(offset: f64, marker: StopMarker) -> Self {
        HoverPreview {
            offset,
            position: marker.position,
            rotation: marker.rotation,
        }
    }
}

/// Input to the state machine. Pointer positions are editor-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    PointerDown(DVec2),
    PointerMove(DVec2),
    PointerUp,
    /// The pointer left the editor bounds without releasing.
    PointerLeave,
    SetFocusedStop(Option<usize>),
    SetFocusedControl(Option<Control>),
    DeleteStop(usize),
    /// Delete/Backspace on the focused stop.
    DeleteFocused,
}

/// What a reduction asks the owner of the gradient value to do.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Control geometry changed. `transform` is `None` when only the
    /// cosmetic linear `C` moved.
    Points {
        points: ControlPoints,
        transform: Option<AffineTransform>,
    },
    StopOffset { index: usize, offset: f64 },
    /// Insert a stop at `offset`; `at` is its sorted position. The owner
    /// picks the color.
    InsertStop { at: usize, offset: f64 },
    DeleteStop { index: usize },
    /// Stable re-sort after a stop drag: `new[i] = old[order[i]]`.
    Reorder { order: Vec<usize> },
    Focus(Focus),
}
