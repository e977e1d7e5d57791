//! Renderable handle positions for one frame.
//!
//! Everything here is in editor pixels. Hosts draw the guide first, then
//! stop markers, then the control handles on top.

use std::fmt;

use glam::DVec2;

use crate::config::EditorConfig;
use crate::editor::{DragState, Focus, HoverPreview, Interaction};
use crate::geometry::Track;
use crate::scene::Scene;
use crate::types::{Control, GradientType};

/// Accessibility role of a handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// A draggable point with two degrees of freedom
    Handle,
    /// A stop; its value is the offset along the track
    Slider,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Handle => write!(f, "handle"),
            Role::Slider => write!(f, "slider"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ControlHandle {
    pub which: Control,
    pub position: DVec2,
    /// `false` for the synthesized linear `C`, drawn but not draggable.
    pub interactive: bool,
    pub focused: bool,
    pub dragging: bool,
    pub role: Role,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StopHandle {
    pub index: usize,
    pub offset: f64,
    pub position: DVec2,
    /// Degrees
    pub rotation: f64,
    pub focused: bool,
    pub dragging: bool,
    pub role: Role,
    pub label: String,
}

/// Visual guide along which stops travel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Guide {
    Line {
        from: DVec2,
        to: DVec2,
    },
    /// Ellipse spanned by A→B and A→C; `rotation` in degrees.
    Ellipse {
        center: DVec2,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
    },
}

/// Where to draw every handle of the editor.
#[derive(Clone, Debug, PartialEq)]
pub struct HandleLayout {
    pub guides: Vec<Guide>,
    pub stops: Vec<StopHandle>,
    pub controls: Vec<ControlHandle>,
    pub hover: Option<HoverPreview>,
}

impl HandleLayout {
    pub fn new<C>(scene: &Scene<'_, C>, config: &EditorConfig, interaction: &Interaction) -> Self {
        let px = scene.points.to_px(scene.size);
        let focus = interaction.focus();
        let drag = interaction.drag();

        let mut guides = vec![Guide::Line { from: px.a, to: px.b }];
        if scene.kind != GradientType::Linear {
            let axis = px.b - px.a;
            guides.push(Guide::Ellipse {
                center: px.a,
                radius_x: axis.length(),
                radius_y: (px.c - px.a).length(),
                rotation: axis.y.atan2(axis.x).to_degrees(),
            });
        }

        let track = scene.track();
        let count = scene.stops.len();
        let stops = scene
            .stops
            .iter()
            .enumerate()
            .map(|(index, stop)| {
                let marker = track.marker_at(stop.offset, config.stop_offset_px);
                StopHandle {
                    index,
                    offset: stop.offset,
                    position: marker.position,
                    rotation: marker.rotation,
                    focused: focus == Focus::Stop(index),
                    dragging: matches!(drag, DragState::Stop { index: i, .. } if i == index),
                    role: Role::Slider,
                    label: format!(
                        "Color stop {} of {count}, {:.0}%",
                        index + 1,
                        stop.offset * 100.0
                    ),
                }
            })
            .collect();

        let controls = Control::ALL
            .into_iter()
            .map(|which| ControlHandle {
                which,
                position: px.get(which),
                interactive: !(which == Control::C && scene.kind == GradientType::Linear),
                focused: focus == Focus::Control(which),
                dragging: matches!(drag, DragState::Control { which: w, .. } if w == which),
                role: Role::Handle,
                label: control_label(which).to_string(),
            })
            .collect();

        HandleLayout {
            guides,
            stops,
            controls,
            hover: interaction.hover(),
        }
    }
}

fn control_label(which: Control) -> &'static str {
    match which {
        Control::A => "Gradient origin",
        Control::B => "Gradient primary axis",
        Control::C => "Gradient secondary axis",
    }
}

struct Px(DVec2);

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // adding zero turns -0.0 into 0.0
        write!(f, "({:.2}, {:.2})", self.0.x + 0.0, self.0.y + 0.0)
    }
}

impl fmt::Display for HandleLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for guide in &self.guides {
            match *guide {
                Guide::Line { from, to } => writeln!(f, "line {} -> {}", Px(from), Px(to))?,
                Guide::Ellipse {
                    center,
                    radius_x,
                    radius_y,
                    rotation,
                } => writeln!(
                    f,
                    "ellipse {} r=({radius_x:.2}, {radius_y:.2}) rot={:.1}",
                    Px(center),
                    rotation + 0.0
                )?,
            }
        }
        for stop in &self.stops {
            write!(
                f,
                "stop {} @{:.2} {} rot={:.1}",
                stop.index,
                stop.offset,
                Px(stop.position),
                stop.rotation + 0.0
            )?;
            if stop.focused {
                write!(f, " focused")?;
            }
            if stop.dragging {
                write!(f, " dragging")?;
            }
            writeln!(f)?;
        }
        for control in &self.controls {
            write!(f, "control {} {}", control.which, Px(control.position))?;
            if !control.interactive {
                write!(f, " inert")?;
            }
            if control.focused {
                write!(f, " focused")?;
            }
            if control.dragging {
                write!(f, " dragging")?;
            }
            writeln!(f)?;
        }
        match self.hover {
            Some(hover) => write!(
                f,
                "hover @{:.2} {} rot={:.1}",
                hover.offset,
                Px(hover.position),
                hover.rotation + 0.0
            ),
            None => write!(f, "hover none"),
        }
    }
}
