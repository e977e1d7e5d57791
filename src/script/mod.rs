//! Session scripts: replayable pointer sessions with expectations.
//!
//! ```text
//! type linear
//! size 400 300
//! stops 0:red 1:blue
//! down 200 150        # click the track
//! up
//! expect stops 0 0.5 1
//! expect focus stop 1
//! ```
//!
//! Setup lines (`type`, `size`, `stops`, `transform`) come first. Events
//! (`down`, `move`, `up`, `leave`, `delete`, `focus`) are dispatched to a
//! managed editor in order, and each `expect` line is checked against the
//! editor state at that point.

use glam::{DVec2, dvec2};
use miette::SourceSpan;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::adapter::{GradientEditor, NeighborColor};
use crate::editor::{Action, DragState, Focus};
use crate::errors::{ScriptError, SourceContext};
use crate::log::debug;
use crate::types::{AffineTransform, Control, GradientStop, GradientType, GradientValue, Size};

#[derive(Parser)]
#[grammar = "script/session.pest"]
struct SessionParser;

/// Numeric expectations pass within this tolerance.
pub const TOLERANCE: f64 = 1e-3;

#[derive(Clone, Debug, PartialEq)]
pub enum Setup {
    Type(GradientType),
    Size(Size),
    /// Offsets with optional color names
    Stops(Vec<(f64, Option<String>)>),
    Transform(AffineTransform),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expectation {
    Stops(Vec<f64>),
    Focus(Focus),
    Hover(Option<f64>),
    /// Relative position of a control point
    Point(Control, DVec2),
    Transform(AffineTransform),
    /// What is being dragged, `Focus::None` for nothing
    Drag(Focus),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Setup(Setup),
    Event(Action),
    Expect(Expectation),
}

/// One parsed line.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub step: Step,
    pub span: SourceSpan,
}

/// A parsed session script.
#[derive(Debug)]
pub struct Session {
    context: SourceContext,
    lines: Vec<Line>,
}

impl Session {
    /// Parse `source`; `name` is used in diagnostics.
    pub fn parse(
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Session, ScriptError> {
        let context = SourceContext::new(name, source);
        let pairs = SessionParser::parse(Rule::session, &context.source).map_err(|err| {
            let span = match err.location {
                pest::error::InputLocation::Pos(pos) => SourceSpan::from((pos, 0)),
                pest::error::InputLocation::Span((start, end)) => {
                    SourceSpan::from((start, end - start))
                }
            };
            ScriptError::Syntax {
                message: err.variant.message().into_owned(),
                src: context.named_source(),
                span,
            }
        })?;

        let reader = Reader { context: &context };
        let mut lines = Vec::new();
        let mut started = false;
        for command in pairs.flatten().filter(|pair| pair.as_rule() == Rule::command) {
            let line = reader.command(command)?;
            match line.step {
                Step::Setup(_) if started => {
                    return Err(ScriptError::LateSetup {
                        src: context.named_source(),
                        span: line.span,
                    });
                }
                Step::Event(_) => started = true,
                _ => {}
            }
            lines.push(line);
        }

        Ok(Session { context, lines })
    }

    pub fn name(&self) -> &str {
        &self.context.name
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Replay the session against a fresh managed editor and return it.
    ///
    /// Inserted stops take the color of their neighbor. The first failed
    /// expectation aborts the replay.
    pub fn run(&self) -> Result<GradientEditor<String>, ScriptError> {
        let mut kind = GradientType::Linear;
        let mut size = Size::default();
        let mut transform = AffineTransform::IDENTITY;
        let mut stops = None;
        for line in &self.lines {
            match &line.step {
                Step::Setup(Setup::Type(k)) => kind = *k,
                Step::Setup(Setup::Size(s)) => size = *s,
                Step::Setup(Setup::Transform(t)) => transform = *t,
                Step::Setup(Setup::Stops(list)) => stops = Some((list, line.span)),
                _ => {}
            }
        }

        let value = match stops {
            Some((list, span)) => {
                let stops = list
                    .iter()
                    .enumerate()
                    .map(|(i, (offset, color))| {
                        let color = color.clone().unwrap_or_else(|| format!("stop{i}"));
                        GradientStop::new(*offset, color)
                    })
                    .collect();
                GradientValue::new(transform, stops).map_err(|err| ScriptError::InvalidValue {
                    message: err.to_string(),
                    src: self.context.named_source(),
                    span,
                })?
            }
            None => GradientValue {
                transform,
                ..GradientValue::with_colors("stop0".to_string(), "stop1".to_string())
            },
        };

        let mut editor = GradientEditor::new(kind, size, value).with_color_policy(NeighborColor);
        for line in &self.lines {
            match &line.step {
                Step::Setup(_) => {}
                Step::Event(action) => {
                    debug!(?action, "replay");
                    editor.dispatch(*action);
                }
                Step::Expect(expectation) => {
                    if let Err(message) = check(&editor, expectation) {
                        return Err(ScriptError::ExpectationFailed {
                            message,
                            src: self.context.named_source(),
                            span: line.span,
                        });
                    }
                }
            }
        }
        Ok(editor)
    }
}

/// Parse and replay `source` in one go.
pub fn replay(name: &str, source: &str) -> Result<GradientEditor<String>, ScriptError> {
    Session::parse(name, source)?.run()
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= TOLERANCE
}

fn drag_target(drag: DragState) -> Focus {
    match drag {
        DragState::None => Focus::None,
        DragState::Stop { index, .. } => Focus::Stop(index),
        DragState::Control { which, .. } => Focus::Control(which),
    }
}

fn check<C>(editor: &GradientEditor<C>, expectation: &Expectation) -> Result<(), String> {
    match expectation {
        Expectation::Stops(expected) => {
            let actual: Vec<f64> = editor.value().offsets().collect();
            let matches = actual.len() == expected.len()
                && actual.iter().zip(expected).all(|(a, e)| close(*a, *e));
            if matches {
                Ok(())
            } else {
                Err(format!("stops are at {actual:?}, expected {expected:?}"))
            }
        }
        Expectation::Focus(expected) => {
            let actual = editor.focus();
            if actual == *expected {
                Ok(())
            } else {
                Err(format!("focus is {actual:?}, expected {expected:?}"))
            }
        }
        Expectation::Hover(expected) => {
            let actual = editor.hover().map(|hover| hover.offset);
            let matches = match (actual, expected) {
                (Some(a), Some(e)) => close(a, *e),
                (None, None) => true,
                _ => false,
            };
            if matches {
                Ok(())
            } else {
                Err(format!("hover is {actual:?}, expected {expected:?}"))
            }
        }
        Expectation::Point(which, expected) => {
            let actual = editor.points().get(*which);
            if actual.abs_diff_eq(*expected, TOLERANCE) {
                Ok(())
            } else {
                Err(format!(
                    "{which} is at ({}, {}), expected ({}, {})",
                    actual.x, actual.y, expected.x, expected.y
                ))
            }
        }
        Expectation::Transform(expected) => {
            let actual = editor.value().transform;
            if actual.approx_eq(expected, TOLERANCE) {
                Ok(())
            } else {
                Err(format!("transform is {actual}, expected {expected}"))
            }
        }
        Expectation::Drag(expected) => {
            let actual = drag_target(editor.interaction().drag());
            if actual == *expected {
                Ok(())
            } else {
                Err(format!("dragging {actual:?}, expected {expected:?}"))
            }
        }
    }
}

/// Turns pest pairs into steps, reporting bad values against the source.
struct Reader<'s> {
    context: &'s SourceContext,
}

impl Reader<'_> {
    fn invalid(&self, pair: &Pair<'_, Rule>, message: impl Into<String>) -> ScriptError {
        let span = pair.as_span();
        ScriptError::InvalidValue {
            message: message.into(),
            src: self.context.named_source(),
            span: SourceSpan::from((span.start(), span.end() - span.start())),
        }
    }

    fn command(&self, pair: Pair<'_, Rule>) -> Result<Line, ScriptError> {
        let whole = pair.as_span();
        let span = SourceSpan::from((whole.start(), whole.end() - whole.start()));
        let Some(inner) = pair.into_inner().next() else {
            return Err(ScriptError::Syntax {
                message: "empty command".to_string(),
                src: self.context.named_source(),
                span,
            });
        };
        let step = self.step(inner)?;
        Ok(Line { step, span })
    }

    fn step(&self, pair: Pair<'_, Rule>) -> Result<Step, ScriptError> {
        let rule = pair.as_rule();
        let outer = pair.clone();
        let mut inner = pair.into_inner();
        let mut next = || inner.next().ok_or_else(|| self.invalid(&outer, "missing argument"));

        let step = match rule {
            Rule::cmd_type => {
                let kind = next()?;
                let parsed =
                    kind.as_str().parse().map_err(|err| self.invalid(&kind, format!("{err}")))?;
                Step::Setup(Setup::Type(parsed))
            }
            Rule::cmd_size => {
                let width = self.number(next()?)?;
                let height = self.number(next()?)?;
                let size = Size::try_new(width, height)
                    .map_err(|err| self.invalid(&outer, err.to_string()))?;
                Step::Setup(Setup::Size(size))
            }
            Rule::cmd_stops => {
                let mut stops = Vec::new();
                for spec in inner.by_ref() {
                    let mut parts = spec.into_inner();
                    let Some(offset) = parts.next() else { continue };
                    let offset = self.number(offset)?;
                    let color = parts.next().map(|color| color.as_str().to_string());
                    stops.push((offset, color));
                }
                Step::Setup(Setup::Stops(stops))
            }
            Rule::cmd_transform => Step::Setup(Setup::Transform(self.matrix(next()?)?)),
            Rule::cmd_down => Step::Event(Action::PointerDown(self.point(next()?, next()?)?)),
            Rule::cmd_move => Step::Event(Action::PointerMove(self.point(next()?, next()?)?)),
            Rule::cmd_up => Step::Event(Action::PointerUp),
            Rule::cmd_leave => Step::Event(Action::PointerLeave),
            Rule::cmd_delete => match inner.next() {
                Some(index) => Step::Event(Action::DeleteStop(self.index(index)?)),
                None => Step::Event(Action::DeleteFocused),
            },
            Rule::cmd_focus => match self.target(next()?)? {
                Focus::None => Step::Event(Action::SetFocusedStop(None)),
                Focus::Stop(index) => Step::Event(Action::SetFocusedStop(Some(index))),
                Focus::Control(which) => Step::Event(Action::SetFocusedControl(Some(which))),
            },
            Rule::cmd_expect => Step::Expect(self.expectation(next()?)?),
            _ => return Err(self.invalid(&outer, format!("unexpected {rule:?}"))),
        };
        Ok(step)
    }

    fn expectation(&self, pair: Pair<'_, Rule>) -> Result<Expectation, ScriptError> {
        let rule = pair.as_rule();
        let outer = pair.clone();
        let mut inner = pair.into_inner();
        let mut next = || inner.next().ok_or_else(|| self.invalid(&outer, "missing argument"));

        let expectation = match rule {
            Rule::expect_stops => {
                let offsets = inner.by_ref().map(|n| self.number(n)).collect::<Result<_, _>>()?;
                Expectation::Stops(offsets)
            }
            Rule::expect_focus => Expectation::Focus(self.target(next()?)?),
            Rule::expect_hover => {
                let value = next()?;
                match value.as_rule() {
                    Rule::none => Expectation::Hover(None),
                    _ => Expectation::Hover(Some(self.number(value)?)),
                }
            }
            Rule::expect_point => {
                let which = self.control(next()?)?;
                Expectation::Point(which, self.point(next()?, next()?)?)
            }
            Rule::expect_transform => Expectation::Transform(self.matrix(next()?)?),
            Rule::expect_drag => Expectation::Drag(self.target(next()?)?),
            _ => return Err(self.invalid(&outer, format!("unexpected {rule:?}"))),
        };
        Ok(expectation)
    }

    fn target(&self, pair: Pair<'_, Rule>) -> Result<Focus, ScriptError> {
        let outer = pair.clone();
        let Some(choice) = pair.into_inner().next() else {
            return Err(self.invalid(&outer, "missing target"));
        };
        match choice.as_rule() {
            Rule::none => Ok(Focus::None),
            Rule::target_stop => {
                let index = choice
                    .clone()
                    .into_inner()
                    .next()
                    .ok_or_else(|| self.invalid(&choice, "missing index"))?;
                Ok(Focus::Stop(self.index(index)?))
            }
            Rule::target_control => {
                let which = choice
                    .clone()
                    .into_inner()
                    .next()
                    .ok_or_else(|| self.invalid(&choice, "missing control"))?;
                Ok(Focus::Control(self.control(which)?))
            }
            rule => Err(self.invalid(&choice, format!("unexpected {rule:?}"))),
        }
    }

    fn control(&self, pair: Pair<'_, Rule>) -> Result<Control, ScriptError> {
        match pair.as_str() {
            "A" => Ok(Control::A),
            "B" => Ok(Control::B),
            "C" => Ok(Control::C),
            other => Err(self.invalid(&pair, format!("unknown control `{other}`"))),
        }
    }

    fn number(&self, pair: Pair<'_, Rule>) -> Result<f64, ScriptError> {
        pair.as_str()
            .parse()
            .map_err(|err| self.invalid(&pair, format!("bad number: {err}")))
    }

    fn index(&self, pair: Pair<'_, Rule>) -> Result<usize, ScriptError> {
        pair.as_str()
            .parse()
            .map_err(|err| self.invalid(&pair, format!("bad index: {err}")))
    }

    fn point(&self, x: Pair<'_, Rule>, y: Pair<'_, Rule>) -> Result<DVec2, ScriptError> {
        Ok(dvec2(self.number(x)?, self.number(y)?))
    }

    fn matrix(&self, pair: Pair<'_, Rule>) -> Result<AffineTransform, ScriptError> {
        let outer = pair.clone();
        let values = pair.into_inner().map(|n| self.number(n)).collect::<Result<Vec<_>, _>>()?;
        let [a, b, tx, d, e, ty] = values[..] else {
            return Err(self.invalid(&outer, "a transform needs six numbers"));
        };
        Ok(AffineTransform::new(a, b, tx, d, e, ty))
    }
}
