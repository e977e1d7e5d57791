//! Core value types shared by the kernel, the state machine and the adapters.
//!
//! Points live in *relative* space: the editable area maps `[0,1]²` onto the
//! editor's pixel size. Values outside `[0,1]` are legal (handles dragged past
//! the edge). Pixel-space values are produced only through [`Size`].

use std::fmt;
use std::str::FromStr;

use glam::{DAffine2, DVec2, dvec2};

use crate::errors::{ParseGradientTypeError, SizeError, ValueError};

/// A 2D point or vector. Relative units unless stated otherwise.
pub type Point = DVec2;

/// Editor pixel size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a Size (unchecked).
    /// Use `try_new` for host-provided values.
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    /// Create a Size with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(width: f64, height: f64) -> Result<Self, SizeError> {
        for value in [width, height] {
            if value.is_nan() {
                return Err(SizeError::NaN);
            } else if value.is_infinite() {
                return Err(SizeError::Infinite);
            } else if value <= 0.0 {
                return Err(SizeError::NonPositive { value });
            }
        }
        Ok(Size { width, height })
    }

    /// The smaller of the two extents; hit thresholds scale with it.
    #[inline]
    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }

    #[inline]
    pub fn as_vec(self) -> DVec2 {
        dvec2(self.width, self.height)
    }

    /// Relative point → pixels.
    #[inline]
    pub fn to_px(self, p: Point) -> DVec2 {
        p * self.as_vec()
    }

    /// Pixels → relative point.
    #[inline]
    pub fn to_relative(self, px: DVec2) -> Point {
        px / self.as_vec()
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::new(400.0, 300.0)
    }
}

/// The gradient family being edited. Fixed for one editing session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GradientType {
    Linear,
    Radial,
    Sweep,
}

impl GradientType {
    pub const ALL: [GradientType; 3] =
        [GradientType::Linear, GradientType::Radial, GradientType::Sweep];

    /// Whether `C` is a synthesized guide rather than an independent handle.
    #[inline]
    pub fn synthesizes_c(self) -> bool {
        self == GradientType::Linear
    }
}

impl fmt::Display for GradientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradientType::Linear => write!(f, "linear"),
            GradientType::Radial => write!(f, "radial"),
            GradientType::Sweep => write!(f, "sweep"),
        }
    }
}

impl FromStr for GradientType {
    type Err = ParseGradientTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(GradientType::Linear),
            "radial" => Ok(GradientType::Radial),
            "sweep" => Ok(GradientType::Sweep),
            other => Err(ParseGradientTypeError {
                found: other.to_string(),
            }),
        }
    }
}

/// One of the three control handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// Origin / center
    A,
    /// Primary axis end
    B,
    /// Secondary axis end
    C,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::A, Control::B, Control::C];
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::A => write!(f, "A"),
            Control::B => write!(f, "B"),
            Control::C => write!(f, "C"),
        }
    }
}

/// The three control points, always derived from (or solved into) an
/// [`AffineTransform`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ControlPoints {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl ControlPoints {
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        ControlPoints { a, b, c }
    }

    pub fn get(&self, which: Control) -> Point {
        match which {
            Control::A => self.a,
            Control::B => self.b,
            Control::C => self.c,
        }
    }

    pub fn get_mut(&mut self, which: Control) -> &mut Point {
        match which {
            Control::A => &mut self.a,
            Control::B => &mut self.b,
            Control::C => &mut self.c,
        }
    }

    /// Primary axis vector `B − A`.
    #[inline]
    pub fn axis(&self) -> DVec2 {
        self.b - self.a
    }

    /// Same points scaled into pixel space.
    pub fn to_px(&self, size: Size) -> ControlPoints {
        ControlPoints {
            a: size.to_px(self.a),
            b: size.to_px(self.b),
            c: size.to_px(self.c),
        }
    }

    pub fn to_array(self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    pub fn from_array([a, b, c]: [Point; 3]) -> Self {
        ControlPoints { a, b, c }
    }

    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }
}

/// A 2×3 affine matrix `[[a, b, tx], [d, e, ty]]`.
///
/// This is the canonical, persisted description of a gradient's placement:
/// it maps the per-type base anchors onto the actual control points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform(pub [[f64; 3]; 2]);

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    pub const fn new(a: f64, b: f64, tx: f64, d: f64, e: f64, ty: f64) -> Self {
        AffineTransform([[a, b, tx], [d, e, ty]])
    }

    #[inline]
    pub fn rows(&self) -> [[f64; 3]; 2] {
        self.0
    }

    /// `(a·x + b·y + tx, d·x + e·y + ty)`
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        DAffine2::from(*self).transform_point2(p)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|v| v.is_finite())
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &AffineTransform, tolerance: f64) -> bool {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .all(|(l, r)| (l - r).abs() <= tolerance)
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        AffineTransform::IDENTITY
    }
}

impl From<AffineTransform> for DAffine2 {
    fn from(t: AffineTransform) -> Self {
        let [[a, b, tx], [d, e, ty]] = t.0;
        DAffine2::from_cols_array(&[a, d, b, e, tx, ty])
    }
}

impl From<DAffine2> for AffineTransform {
    fn from(m: DAffine2) -> Self {
        let [a, d, b, e, tx, ty] = m.to_cols_array();
        AffineTransform::new(a, b, tx, d, e, ty)
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [[a, b, tx], [d, e, ty]] = self.0;
        write!(f, "[[{a}, {b}, {tx}], [{d}, {e}, {ty}]]")
    }
}

/// One color stop. The color is opaque to this crate.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStop<C> {
    pub offset: f64,
    pub color: C,
}

impl<C> GradientStop<C> {
    pub fn new(offset: f64, color: C) -> Self {
        GradientStop { offset, color }
    }
}

/// The value exchanged with the host on every commit.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientValue<C> {
    pub transform: AffineTransform,
    pub stops: Vec<GradientStop<C>>,
}

impl<C> GradientValue<C> {
    /// Validate a host-provided value.
    ///
    /// Offsets outside `[0,1]` are clamped; fewer than two stops or
    /// non-finite numbers are rejected.
    pub fn new(
        transform: AffineTransform,
        mut stops: Vec<GradientStop<C>>,
    ) -> Result<Self, ValueError> {
        if stops.len() < crate::stops::MIN_STOPS {
            return Err(ValueError::TooFewStops { count: stops.len() });
        }
        if !transform.is_finite() {
            return Err(ValueError::NonFiniteTransform);
        }
        for (index, stop) in stops.iter_mut().enumerate() {
            if !stop.offset.is_finite() {
                return Err(ValueError::NonFiniteOffset { index });
            }
            stop.offset = stop.offset.clamp(0.0, 1.0);
        }
        Ok(GradientValue { transform, stops })
    }

    /// The session default: identity transform, stops at 0 and 1.
    pub fn with_colors(start: C, end: C) -> Self {
        GradientValue {
            transform: AffineTransform::IDENTITY,
            stops: vec![GradientStop::new(0.0, start), GradientStop::new(1.0, end)],
        }
    }

    pub fn offsets(&self) -> impl Iterator<Item = f64> + '_ {
        self.stops.iter().map(|s| s.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_rejects_degenerate_extents() {
        assert_eq!(Size::try_new(f64::NAN, 1.0), Err(SizeError::NaN));
        assert_eq!(Size::try_new(1.0, f64::INFINITY), Err(SizeError::Infinite));
        assert_eq!(Size::try_new(0.0, 1.0), Err(SizeError::NonPositive { value: 0.0 }));
        assert_eq!(Size::try_new(400.0, 300.0), Ok(Size::new(400.0, 300.0)));
    }

    #[test]
    fn transform_roundtrips_through_glam() {
        let t = AffineTransform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let m: DAffine2 = t.into();
        assert_eq!(AffineTransform::from(m), t);
        assert_eq!(t.apply(dvec2(1.0, 1.0)), dvec2(6.0, 15.0));
    }

    #[test]
    fn value_clamps_offsets_and_rejects_short_lists() {
        let value = GradientValue::new(
            AffineTransform::IDENTITY,
            vec![GradientStop::new(-0.5, ()), GradientStop::new(1.5, ())],
        )
        .unwrap();
        assert_eq!(value.offsets().collect::<Vec<_>>(), vec![0.0, 1.0]);

        let err = GradientValue::new(AffineTransform::IDENTITY, vec![GradientStop::new(0.0, ())]);
        assert!(matches!(err, Err(ValueError::TooFewStops { count: 1 })));

        let err = GradientValue::new(
            AffineTransform::new(f64::NAN, 0.0, 0.0, 0.0, 1.0, 0.0),
            vec![GradientStop::new(0.0, ()), GradientStop::new(1.0, ())],
        );
        assert!(matches!(err, Err(ValueError::NonFiniteTransform)));
    }

    #[test]
    fn gradient_type_parses_and_displays() {
        for kind in GradientType::ALL {
            assert_eq!(kind.to_string().parse::<GradientType>().unwrap(), kind);
        }
        assert!("conic".parse::<GradientType>().is_err());
    }
}
