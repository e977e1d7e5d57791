//! The controlled editor: the host owns the value and applies changes itself.

use super::layout::HandleLayout;
use crate::config::EditorConfig;
use crate::editor::{Action, DragCapture, Effect, Focus, Interaction, PointerCapture};
use crate::scene::Scene;
use crate::types::{AffineTransform, Control, ControlPoints, GradientStop, GradientType, Size};

use std::rc::Rc;

/// What the host currently shows, passed in with every event.
#[derive(Debug)]
pub struct ControlledProps<'a, C> {
    pub kind: GradientType,
    pub size: Size,
    pub points: &'a ControlPoints,
    pub stops: &'a [GradientStop<C>],
    /// Focused stop when the host manages focus itself.
    pub focused_stop: Option<usize>,
}

impl<'a, C> ControlledProps<'a, C> {
    pub fn scene(&self) -> Scene<'a, C> {
        Scene::new(self.kind, self.size, self.points, self.stops)
    }
}

/// Change notifications of a controlled editor. Every method defaults to
/// doing nothing.
#[allow(unused_variables)]
pub trait GradientEvents {
    /// Control points moved. `transform` is `None` when only the cosmetic
    /// linear `C` moved.
    fn on_points_change(&mut self, points: ControlPoints, transform: Option<AffineTransform>) {}

    fn on_position_change(&mut self, index: usize, offset: f64) {}

    /// Insert a stop at `offset` at index `at`; the host picks the color.
    fn on_insert_stop(&mut self, at: usize, offset: f64) {}

    fn on_delete_stop(&mut self, index: usize) {}

    fn on_focused_stop_change(&mut self, index: Option<usize>) {}

    fn on_focused_control_change(&mut self, control: Option<Control>) {}

    /// The stops were re-sorted: `new[i] = old[order[i]]`.
    fn on_stops_reorder(&mut self, order: &[usize]) {}
}

/// A gradient editor that only holds interaction state.
#[derive(Debug, Default)]
pub struct ControlledEditor {
    interaction: Interaction,
    config: EditorConfig,
    capture: DragCapture,
}

impl ControlledEditor {
    pub fn new(config: EditorConfig) -> Self {
        ControlledEditor {
            config,
            ..Default::default()
        }
    }

    pub fn with_capture(mut self, region: Rc<dyn PointerCapture>) -> Self {
        self.capture = DragCapture::new(region);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EditorConfig) {
        self.config = config;
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_held()
    }

    /// Reduce `action` against the host's current props and report the
    /// resulting changes to `events`.
    pub fn handle<C>(
        &mut self,
        props: &ControlledProps<'_, C>,
        action: Action,
        events: &mut impl GradientEvents,
    ) {
        self.interaction.sync_focused_stop(props.focused_stop);
        let mut focus = self.interaction.focus();

        let scene = props.scene();
        for effect in self.interaction.reduce(&scene, &self.config, action) {
            match effect {
                Effect::Points { points, transform } => events.on_points_change(points, transform),
                Effect::StopOffset { index, offset } => events.on_position_change(index, offset),
                Effect::InsertStop { at, offset } => events.on_insert_stop(at, offset),
                Effect::DeleteStop { index } => events.on_delete_stop(index),
                Effect::Reorder { order } => events.on_stops_reorder(&order),
                Effect::Focus(next) => {
                    report_focus(focus, next, events);
                    focus = next;
                }
            }
        }
        self.capture.sync(self.interaction.is_dragging());
    }

    /// Handles to draw for the host's current props.
    pub fn layout<C>(&self, props: &ControlledProps<'_, C>) -> HandleLayout {
        HandleLayout::new(&props.scene(), &self.config, &self.interaction)
    }
}

fn report_focus(previous: Focus, next: Focus, events: &mut impl GradientEvents) {
    if previous.stop() != next.stop() || (previous == next && next.stop().is_some()) {
        events.on_focused_stop_change(next.stop());
    }
    if previous.control() != next.control() {
        events.on_focused_control_change(next.control());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::base_anchors;
    use glam::dvec2;

    #[derive(Debug, Default)]
    struct Recorder {
        log: Vec<String>,
    }

    impl GradientEvents for Recorder {
        fn on_points_change(&mut self, points: ControlPoints, transform: Option<AffineTransform>) {
            self.log.push(format!(
                "points b=({:.2}, {:.2}) solved={}",
                points.b.x,
                points.b.y,
                transform.is_some()
            ));
        }
        fn on_position_change(&mut self, index: usize, offset: f64) {
            self.log.push(format!("position {index} {offset:.2}"));
        }
        fn on_insert_stop(&mut self, at: usize, offset: f64) {
            self.log.push(format!("insert {at} {offset:.2}"));
        }
        fn on_delete_stop(&mut self, index: usize) {
            self.log.push(format!("delete {index}"));
        }
        fn on_focused_stop_change(&mut self, index: Option<usize>) {
            self.log.push(format!("focus stop {index:?}"));
        }
        fn on_focused_control_change(&mut self, control: Option<Control>) {
            self.log.push(format!("focus control {control:?}"));
        }
        fn on_stops_reorder(&mut self, order: &[usize]) {
            self.log.push(format!("reorder {order:?}"));
        }
    }

    fn stops(offsets: &[f64]) -> Vec<GradientStop<()>> {
        offsets.iter().map(|&o| GradientStop::new(o, ())).collect()
    }

    #[test]
    fn track_click_asks_the_host_to_insert() {
        let points = base_anchors(GradientType::Linear);
        let list = stops(&[0.0, 1.0]);
        let props = ControlledProps {
            kind: GradientType::Linear,
            size: Size::new(400.0, 300.0),
            points: &points,
            stops: &list,
            focused_stop: None,
        };
        let mut editor = ControlledEditor::default();
        let mut events = Recorder::default();
        editor.handle(&props, Action::PointerDown(dvec2(300.0, 150.0)), &mut events);
        assert_eq!(events.log, vec!["insert 1 0.75", "focus stop Some(1)"]);
        assert!(!editor.is_capturing());
    }

    #[test]
    fn control_focus_replaces_stop_focus() {
        let points = base_anchors(GradientType::Radial);
        let list = stops(&[0.0, 1.0]);
        let props = ControlledProps {
            kind: GradientType::Radial,
            size: Size::new(400.0, 300.0),
            points: &points,
            stops: &list,
            focused_stop: Some(0),
        };
        let mut editor = ControlledEditor::default();
        let mut events = Recorder::default();
        // C of the radial gradient at (200, 300)
        editor.handle(&props, Action::PointerDown(dvec2(200.0, 299.0)), &mut events);
        assert_eq!(events.log, vec!["focus stop None", "focus control Some(C)"]);
        assert!(editor.is_capturing());

        events.log.clear();
        editor.handle(&props, Action::PointerMove(dvec2(260.0, 280.0)), &mut events);
        assert_eq!(events.log, vec!["points b=(1.00, 0.50) solved=true"]);
    }

    #[test]
    fn host_sees_reorder_after_stop_drag() {
        let points = base_anchors(GradientType::Linear);
        let size = Size::new(400.0, 300.0);
        let mut list = stops(&[0.1, 0.5, 0.9]);
        let mut editor = ControlledEditor::default();
        let mut events = Recorder::default();

        let props = ControlledProps {
            kind: GradientType::Linear,
            size,
            points: &points,
            stops: &list,
            focused_stop: None,
        };
        editor.handle(&props, Action::PointerDown(dvec2(40.0, 125.0)), &mut events);
        editor.handle(&props, Action::PointerMove(dvec2(240.0, 125.0)), &mut events);

        // the host applies the position change
        list[0].offset = 0.6;
        let props = ControlledProps {
            kind: GradientType::Linear,
            size,
            points: &points,
            stops: &list,
            focused_stop: Some(0),
        };
        editor.handle(&props, Action::PointerUp, &mut events);
        assert_eq!(
            events.log,
            vec![
                "focus stop Some(0)",
                "position 0 0.60",
                "reorder [1, 0, 2]",
                "focus stop Some(1)",
            ]
        );
        assert!(!editor.is_capturing());
    }

    #[test]
    fn readonly_reports_nothing() {
        let points = base_anchors(GradientType::Linear);
        let list = stops(&[0.0, 0.5, 1.0]);
        let props = ControlledProps {
            kind: GradientType::Linear,
            size: Size::new(400.0, 300.0),
            points: &points,
            stops: &list,
            focused_stop: Some(1),
        };
        let mut editor = ControlledEditor::new(EditorConfig::new().readonly(true));
        let mut events = Recorder::default();
        editor.handle(&props, Action::DeleteFocused, &mut events);
        editor.handle(&props, Action::PointerDown(dvec2(200.0, 150.0)), &mut events);
        assert!(events.log.is_empty());
    }
}
