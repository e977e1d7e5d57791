//! The managed editor: owns the gradient value.

use std::fmt;
use std::rc::Rc;

use super::layout::HandleLayout;
use crate::config::EditorConfig;
use crate::editor::{Action, DragCapture, Effect, Focus, HoverPreview, Interaction, PointerCapture};
use crate::geometry::transform_to_points;
use crate::log::debug;
use crate::scene::Scene;
use crate::stops::{apply_order, delete_stop};
use crate::types::{ControlPoints, GradientStop, GradientType, GradientValue, Size};

use glam::DVec2;

/// Picks the color of a stop inserted by clicking the track.
pub trait StopColorPolicy<C> {
    /// `stops` is the list before insertion; the new stop will land at `at`.
    /// `None` skips the insertion.
    fn color_for(&mut self, stops: &[GradientStop<C>], at: usize, offset: f64) -> Option<C>;
}

impl<C, F> StopColorPolicy<C> for F
where
    F: FnMut(&[GradientStop<C>], usize, f64) -> C,
{
    fn color_for(&mut self, stops: &[GradientStop<C>], at: usize, offset: f64) -> Option<C> {
        Some(self(stops, at, offset))
    }
}

/// Copies the color of the preceding stop, or the following one when
/// inserting at the front. An empty list has nothing to copy.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeighborColor;

impl<C: Clone> StopColorPolicy<C> for NeighborColor {
    fn color_for(&mut self, stops: &[GradientStop<C>], at: usize, _offset: f64) -> Option<C> {
        stops
            .get(at.saturating_sub(1))
            .or_else(|| stops.get(at))
            .map(|stop| stop.color.clone())
    }
}

type ChangeCallback<C> = Box<dyn FnMut(&GradientValue<C>)>;

/// A gradient editor that owns its value.
///
/// Every committed change (control drag, stop move, insert, delete,
/// re-sort) updates the value and invokes the `on_change` callback.
///
/// ```
/// use gradient_editor::{GradientEditor, GradientType, GradientValue, Size};
/// use glam::dvec2;
///
/// let mut editor = GradientEditor::new(
///     GradientType::Linear,
///     Size::new(400.0, 300.0),
///     GradientValue::with_colors("red", "blue"),
/// );
/// // click the middle of the track
/// editor.pointer_down(dvec2(200.0, 150.0));
/// editor.pointer_up();
/// let offsets: Vec<f64> = editor.value().offsets().collect();
/// assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
/// assert_eq!(editor.value().stops[1].color, "red");
/// ```
pub struct GradientEditor<C> {
    kind: GradientType,
    size: Size,
    config: EditorConfig,
    value: GradientValue<C>,
    points: ControlPoints,
    interaction: Interaction,
    colors: Box<dyn StopColorPolicy<C>>,
    on_change: Option<ChangeCallback<C>>,
    capture: DragCapture,
}

impl<C: Clone + 'static> GradientEditor<C> {
    pub fn new(kind: GradientType, size: Size, value: GradientValue<C>) -> Self {
        GradientEditor {
            kind,
            size,
            config: EditorConfig::default(),
            points: transform_to_points(&value.transform, kind),
            value,
            interaction: Interaction::new(),
            colors: Box::new(NeighborColor),
            on_change: None,
            capture: DragCapture::default(),
        }
    }
}

impl<C> GradientEditor<C> {
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_color_policy(mut self, policy: impl StopColorPolicy<C> + 'static) -> Self {
        self.colors = Box::new(policy);
        self
    }

    pub fn with_capture(mut self, region: Rc<dyn PointerCapture>) -> Self {
        self.capture = DragCapture::new(region);
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(&GradientValue<C>) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn kind(&self) -> GradientType {
        self.kind
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn value(&self) -> &GradientValue<C> {
        &self.value
    }

    pub fn points(&self) -> &ControlPoints {
        &self.points
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn focus(&self) -> Focus {
        self.interaction.focus()
    }

    pub fn hover(&self) -> Option<HoverPreview> {
        self.interaction.hover()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_held()
    }

    /// Replace the value from outside (undo, another panel, ...).
    ///
    /// Control points are re-derived, any drag is dropped and a focus on a
    /// stop that no longer exists is cleared. `on_change` is not called.
    pub fn set_value(&mut self, value: GradientValue<C>) {
        self.points = transform_to_points(&value.transform, self.kind);
        self.interaction.reset(value.stops.len());
        self.value = value;
        self.capture.sync(false);
    }

    /// Resize the editor; relative geometry is unaffected.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_config(&mut self, config: EditorConfig) {
        self.config = config;
    }

    /// Feed one action through the state machine and apply its effects.
    /// Returns whether the value changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let scene = Scene::new(self.kind, self.size, &self.points, &self.value.stops);
        let effects = self.interaction.reduce(&scene, &self.config, action);

        let mut changed = false;
        for effect in effects {
            changed |= self.apply(effect);
        }
        self.capture.sync(self.interaction.is_dragging());

        if changed {
            if let Some(callback) = self.on_change.as_mut() {
                callback(&self.value);
            }
        }
        changed
    }

    pub fn pointer_down(&mut self, pointer: DVec2) -> bool {
        self.dispatch(Action::PointerDown(pointer))
    }

    pub fn pointer_move(&mut self, pointer: DVec2) -> bool {
        self.dispatch(Action::PointerMove(pointer))
    }

    pub fn pointer_up(&mut self) -> bool {
        self.dispatch(Action::PointerUp)
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.dispatch(Action::PointerLeave)
    }

    pub fn delete_stop(&mut self, index: usize) -> bool {
        self.dispatch(Action::DeleteStop(index))
    }

    /// Handles to draw for the current state.
    pub fn layout(&self) -> HandleLayout {
        let scene = Scene::new(self.kind, self.size, &self.points, &self.value.stops);
        HandleLayout::new(&scene, &self.config, &self.interaction)
    }

    fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::Points { points, transform } => {
                self.points = points;
                match transform {
                    Some(transform) => {
                        self.value.transform = transform;
                        true
                    }
                    None => false,
                }
            }
            Effect::StopOffset { index, offset } => match self.value.stops.get_mut(index) {
                Some(stop) => {
                    stop.offset = offset;
                    true
                }
                None => false,
            },
            Effect::InsertStop { at, offset } => {
                let Some(color) = self.colors.color_for(&self.value.stops, at, offset) else {
                    debug!(at, offset, "no color for the new stop, skipping insert");
                    // the machine already focused the stop that never came to be
                    self.interaction.reset(self.value.stops.len());
                    return false;
                };
                self.value.stops.insert(at, GradientStop::new(offset, color));
                true
            }
            Effect::DeleteStop { index } => delete_stop(&mut self.value.stops, index).is_some(),
            Effect::Reorder { order } => {
                apply_order(&mut self.value.stops, &order);
                true
            }
            Effect::Focus(focus) => {
                debug!(?focus, "focus changed");
                false
            }
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for GradientEditor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientEditor")
            .field("kind", &self.kind)
            .field("size", &self.size)
            .field("value", &self.value)
            .field("points", &self.points)
            .field("interaction", &self.interaction)
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AffineTransform, Control};
    use glam::dvec2;
    use std::cell::{Cell, RefCell};

    const SIZE: Size = Size::new(400.0, 300.0);

    fn editor(kind: GradientType, offsets: &[f64]) -> GradientEditor<usize> {
        let stops = offsets.iter().enumerate().map(|(i, &o)| GradientStop::new(o, i)).collect();
        let value = GradientValue::new(AffineTransform::IDENTITY, stops).expect("valid value");
        GradientEditor::new(kind, SIZE, value)
    }

    fn offsets(editor: &GradientEditor<usize>) -> Vec<f64> {
        editor.value().offsets().collect()
    }

    #[test]
    fn insert_then_delete_restores_stops() {
        let mut editor = editor(GradientType::Linear, &[0.0, 1.0]);
        editor.pointer_down(dvec2(200.0, 150.0));
        editor.pointer_up();
        assert_eq!(offsets(&editor), vec![0.0, 0.5, 1.0]);
        assert_eq!(editor.focus(), Focus::Stop(1));

        editor.delete_stop(1);
        assert_eq!(offsets(&editor), vec![0.0, 1.0]);
        assert_eq!(editor.focus(), Focus::None);
    }

    #[test]
    fn drag_reorder_follows_the_stop() {
        let mut editor = editor(GradientType::Linear, &[0.1, 0.5, 0.9]);
        // marker of stop 0 sits at (40, 125)
        editor.pointer_down(dvec2(40.0, 125.0));
        editor.pointer_move(dvec2(240.0, 125.0));
        assert_eq!(offsets(&editor), vec![0.6, 0.5, 0.9]);
        editor.pointer_up();

        let value = editor.value();
        assert_eq!(offsets(&editor), vec![0.5, 0.6, 0.9]);
        assert_eq!(value.stops[1].color, 0);
        assert_eq!(editor.focus(), Focus::Stop(1));
    }

    #[test]
    fn pressing_elsewhere_mid_drag_still_sorts() {
        let mut editor = editor(GradientType::Linear, &[0.1, 0.5, 0.9]);
        editor.pointer_down(dvec2(40.0, 125.0));
        editor.pointer_move(dvec2(240.0, 125.0));
        // no release before grabbing B
        editor.pointer_down(dvec2(400.0, 150.0));
        editor.pointer_up();

        assert_eq!(offsets(&editor), vec![0.5, 0.6, 0.9]);
        assert_eq!(editor.value().stops[1].color, 0);
        assert_eq!(editor.focus(), Focus::Control(Control::B));
    }

    #[test]
    fn on_change_fires_per_commit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut editor = editor(GradientType::Radial, &[0.0, 1.0])
            .on_change(move |value: &GradientValue<usize>| sink.borrow_mut().push(value.transform));

        // drag B from (400, 150) to (300, 150)
        editor.pointer_down(dvec2(400.0, 150.0));
        assert_eq!(editor.focus(), Focus::Control(Control::B));
        editor.pointer_move(dvec2(300.0, 150.0));
        editor.pointer_up();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        let expected = AffineTransform::new(0.5, 0.0, 0.25, 0.0, 1.0, 0.0);
        assert!(seen[0].approx_eq(&expected, 1e-9), "{}", seen[0]);
    }

    #[test]
    fn cosmetic_linear_c_does_not_commit() {
        let mut editor = editor(GradientType::Linear, &[0.0, 1.0]);
        let before = *editor.points();
        // linear C is never hit-tested, so apply the effect a C drag would produce
        let moved = Effect::Points {
            points: ControlPoints::new(before.a, before.b, dvec2(0.1, 1.0)),
            transform: None,
        };
        assert!(!editor.apply(moved));
        assert_eq!(editor.value().transform, AffineTransform::IDENTITY);
        assert_ne!(editor.points().c, before.c);
    }

    #[test]
    fn set_value_drops_stale_focus_and_drag() {
        let mut editor = editor(GradientType::Linear, &[0.0, 0.5, 1.0]);
        editor.pointer_down(dvec2(400.0, 125.0));
        assert_eq!(editor.focus(), Focus::Stop(2));
        assert!(editor.interaction().is_dragging());

        editor.set_value(GradientValue::with_colors(7, 8));
        assert!(!editor.interaction().is_dragging());
        assert_eq!(editor.focus(), Focus::None);
        assert!(!editor.is_capturing());
    }

    #[test]
    fn closures_pick_inserted_colors() {
        let mut editor = editor(GradientType::Linear, &[0.0, 1.0])
            .with_color_policy(|_: &[GradientStop<usize>], at: usize, _: f64| 100 + at);
        editor.pointer_down(dvec2(100.0, 150.0));
        assert_eq!(editor.value().stops[1].color, 101);
    }

    #[test]
    fn neighbor_color_at_the_front_copies_the_next_stop() {
        let stops = vec![GradientStop::new(0.2, 'a'), GradientStop::new(1.0, 'b')];
        assert_eq!(NeighborColor.color_for(&stops, 0, 0.1), Some('a'));
        assert_eq!(NeighborColor.color_for(&stops, 1, 0.5), Some('a'));
        assert_eq!(NeighborColor.color_for(&stops, 2, 1.0), Some('b'));
        assert_eq!(NeighborColor.color_for(&[] as &[GradientStop<char>], 0, 0.5), None);
    }

    #[test]
    fn track_press_on_an_empty_list_inserts_nothing() {
        let empty: GradientValue<usize> = GradientValue {
            transform: AffineTransform::IDENTITY,
            stops: Vec::new(),
        };
        let mut editor = GradientEditor::new(GradientType::Linear, SIZE, empty);
        assert!(!editor.pointer_down(dvec2(200.0, 150.0)));
        assert!(editor.value().stops.is_empty());
        assert_eq!(editor.focus(), Focus::None);
    }

    /// Capture region counting outstanding acquisitions.
    struct Counter(Cell<i32>);

    impl PointerCapture for Counter {
        fn acquire(&self) {
            self.0.set(self.0.get() + 1);
        }
        fn release(&self) {
            self.0.set(self.0.get() - 1);
        }
    }

    #[test]
    fn capture_is_held_only_while_dragging() {
        let region = Rc::new(Counter(Cell::new(0)));
        let mut editor = editor(GradientType::Sweep, &[0.0, 1.0]).with_capture(region.clone());
        // A of the sweep gradient at (200, 150)
        editor.pointer_down(dvec2(200.0, 150.0));
        assert_eq!(region.0.get(), 1);
        editor.pointer_move(dvec2(210.0, 150.0));
        assert_eq!(region.0.get(), 1);
        editor.pointer_up();
        assert_eq!(region.0.get(), 0);

        editor.pointer_down(dvec2(200.0, 150.0));
        drop(editor);
        assert_eq!(region.0.get(), 0);
    }

    #[test]
    fn switching_to_readonly_mid_drag_still_releases() {
        let region = Rc::new(Counter(Cell::new(0)));
        let mut editor = editor(GradientType::Radial, &[0.0, 1.0]).with_capture(region.clone());
        editor.pointer_down(dvec2(400.0, 150.0));
        assert_eq!(region.0.get(), 1);

        editor.set_config(EditorConfig::new().readonly(true));
        assert!(!editor.pointer_move(dvec2(300.0, 150.0)));
        assert!(!editor.pointer_up());
        assert!(!editor.interaction().is_dragging());
        assert_eq!(region.0.get(), 0);
    }

    #[test]
    fn readonly_editor_never_changes() {
        let mut editor = editor(GradientType::Linear, &[0.0, 1.0])
            .with_config(EditorConfig::new().readonly(true));
        assert!(!editor.pointer_down(dvec2(200.0, 150.0)));
        assert!(!editor.delete_stop(0));
        assert_eq!(offsets(&editor), vec![0.0, 1.0]);
    }
}
