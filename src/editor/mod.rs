//! Interaction state machine
//!
//! This module is organized into submodules:
//! - `state`: Drag, focus and hover state plus the action/effect vocabulary
//! - `constraints`: Control drag coupling between A, B and C
//! - `capture`: Pointer capture held for the duration of a drag
//!
//! [`Interaction`] reduces `(state, action)` synchronously. It never touches
//! the gradient value itself; it reads a [`Scene`] and returns [`Effect`]s
//! that the owner of the value applies. Both the managed and the controlled
//! adapters drive the same machine.

pub mod capture;
pub mod constraints;
pub mod state;

pub use capture::{CaptureGuard, DragCapture, NoCapture, PointerCapture};
pub use state::{Action, DragState, Effect, Focus, HoverPreview};

use glam::DVec2;

use crate::config::EditorConfig;
use crate::geometry::Track;
use crate::hit::{Hit, detect_hit_target};
use crate::log::{debug, trace};
use crate::scene::Scene;
use crate::stops::{
    can_delete, focus_after_delete, insertion_index, is_identity, remap_index, sort_order,
    sorted_insertion_index,
};

/// Drag, focus and hover state of one editing session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interaction {
    drag: DragState,
    focus: Focus,
    hover: Option<HoverPreview>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn hover(&self) -> Option<HoverPreview> {
        self.hover
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Adopt a focused stop managed by the host. Control focus survives a
    /// host that reports no focused stop.
    pub fn sync_focused_stop(&mut self, focused_stop: Option<usize>) {
        match focused_stop {
            Some(index) => self.focus = Focus::Stop(index),
            None if matches!(self.focus, Focus::Stop(_)) => self.focus = Focus::None,
            None => {}
        }
    }

    /// Drop drag and hover state after the value was replaced externally,
    /// along with a stop focus that no longer exists.
    pub fn reset(&mut self, stop_count: usize) {
        self.drag = DragState::None;
        self.hover = None;
        if matches!(self.focus, Focus::Stop(index) if index >= stop_count) {
            self.focus = Focus::None;
        }
    }

    /// Reduce one action against `scene`.
    pub fn reduce<C>(
        &mut self,
        scene: &Scene<'_, C>,
        config: &EditorConfig,
        action: Action,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        // a drag started before readonly was switched on still has to end
        if config.readonly && action != Action::PointerUp {
            trace!(?action, "readonly, ignoring");
            return effects;
        }

        match action {
            Action::PointerDown(pointer) => self.pointer_down(scene, config, pointer, &mut effects),
            Action::PointerMove(pointer) => self.pointer_move(scene, config, pointer, &mut effects),
            Action::PointerUp => {
                self.pointer_up(scene, &mut effects);
            }
            Action::PointerLeave => self.hover = None,
            Action::SetFocusedStop(Some(index)) if index >= scene.stops.len() => {
                debug!(index, "focus on a missing stop, ignoring");
            }
            Action::SetFocusedStop(index) => self.set_focus(index.into(), &mut effects),
            Action::SetFocusedControl(which) => self.set_focus(which.into(), &mut effects),
            Action::DeleteStop(index) => self.delete_stop(scene, index, &mut effects),
            Action::DeleteFocused => {
                if let Focus::Stop(index) = self.focus {
                    self.delete_stop(scene, index, &mut effects);
                }
            }
        }
        effects
    }

    fn set_focus(&mut self, focus: Focus, effects: &mut Vec<Effect>) {
        if self.focus != focus {
            self.focus = focus;
            effects.push(Effect::Focus(focus));
        }
    }

    fn pointer_down<C>(
        &mut self,
        scene: &Scene<'_, C>,
        config: &EditorConfig,
        pointer: DVec2,
        effects: &mut Vec<Effect>,
    ) {
        debug_assert!(pointer.is_finite(), "host delivered a non-finite pointer: {pointer:?}");
        self.hover = None;
        // a new press supersedes a leftover drag, which ends as if released
        let order = self.pointer_up(scene, effects);
        let sorted = |index: usize| match &order {
            Some(order) => remap_index(order, index).unwrap_or(index),
            None => index,
        };

        match detect_hit_target(pointer, scene, config) {
            Some(Hit::Control { which, .. }) => {
                let pointer_offset = pointer - scene.control_px(which);
                debug!(%which, "control drag start");
                self.drag = DragState::Control { which, pointer_offset };
                self.set_focus(Focus::Control(which), effects);
            }
            Some(Hit::Stop { index, .. }) => {
                let marker = scene
                    .track()
                    .marker_at(scene.stops[index].offset, config.stop_offset_px);
                let index = sorted(index);
                debug!(index, "stop drag start");
                self.drag = DragState::Stop {
                    index,
                    pointer_offset: pointer - marker.position,
                };
                self.set_focus(Focus::Stop(index), effects);
            }
            Some(Hit::Track { offset, .. }) => {
                let at = if order.is_some() {
                    sorted_insertion_index(scene.stops, offset)
                } else {
                    insertion_index(scene.stops, offset)
                };
                debug!(at, offset, "insert stop");
                effects.push(Effect::InsertStop { at, offset });
                // the new stop takes index `at`; report focus even if the index is unchanged
                self.focus = Focus::Stop(at);
                effects.push(Effect::Focus(self.focus));
            }
            None => self.set_focus(Focus::None, effects),
        }
    }

    fn pointer_move<C>(
        &mut self,
        scene: &Scene<'_, C>,
        config: &EditorConfig,
        pointer: DVec2,
        effects: &mut Vec<Effect>,
    ) {
        debug_assert!(pointer.is_finite(), "host delivered a non-finite pointer: {pointer:?}");
        match self.drag {
            DragState::Control { which, pointer_offset } => {
                self.hover = None;
                let target = pointer - pointer_offset;
                let delta = scene.size.to_relative(target - scene.control_px(which));
                let (points, transform) =
                    constraints::drag_and_solve(scene.points, which, delta, scene.kind);
                trace!(%which, ?delta, "control moved");
                effects.push(Effect::Points { points, transform });
            }
            DragState::Stop { index, pointer_offset } => {
                self.hover = None;
                if index >= scene.stops.len() {
                    debug!(index, "dragged stop vanished, dropping drag");
                    self.drag = DragState::None;
                    return;
                }
                let offset = scene.track().position_at(pointer - pointer_offset).clamp(0.0, 1.0);
                trace!(index, offset, "stop moved");
                effects.push(Effect::StopOffset { index, offset });
            }
            DragState::None => {
                self.hover = match detect_hit_target(pointer, scene, config) {
                    Some(Hit::Track { offset, .. }) => {
                        let marker = scene.track().marker_at(offset, config.stop_offset_px);
                        Some(HoverPreview::new(offset, marker))
                    }
                    _ => None,
                };
            }
        }
    }

    /// End the current drag. A stop drag re-sorts the list; the applied
    /// order is returned when it moved anything.
    fn pointer_up<C>(
        &mut self,
        scene: &Scene<'_, C>,
        effects: &mut Vec<Effect>,
    ) -> Option<Vec<usize>> {
        let drag = std::mem::take(&mut self.drag);
        if !matches!(drag, DragState::Stop { .. }) {
            return None;
        }
        let order = sort_order(scene.stops);
        if is_identity(&order) {
            debug!(?drag, "stop drag end, order unchanged");
            return None;
        }
        debug!(?drag, ?order, "stop drag end, re-sorting");
        let focus = match self.focus {
            Focus::Stop(focused) => remap_index(&order, focused).into(),
            other => other,
        };
        effects.push(Effect::Reorder { order: order.clone() });
        self.set_focus(focus, effects);
        Some(order)
    }

    fn delete_stop<C>(&mut self, scene: &Scene<'_, C>, index: usize, effects: &mut Vec<Effect>) {
        let len = scene.stops.len();
        if !can_delete(len) || index >= len {
            debug!(index, len, "delete rejected");
            return;
        }
        debug!(index, "delete stop");
        effects.push(Effect::DeleteStop { index });

        if let DragState::Stop { index: dragged, pointer_offset } = self.drag {
            self.drag = match focus_after_delete(Some(dragged), index) {
                Some(index) => DragState::Stop { index, pointer_offset },
                None => DragState::None,
            };
        }
        if let Focus::Stop(focused) = self.focus {
            self.set_focus(focus_after_delete(Some(focused), index).into(), effects);
        }
    }
}
