//! Error types with rich diagnostics using miette
//!
//! Geometry and interaction never fail; errors only exist where host input
//! enters the crate (values, sizes) and where session scripts are parsed or
//! replayed. Script errors carry source spans for readable reports.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// Value Errors
// ============================================================================

/// A host-provided [`GradientValue`](crate::GradientValue) that cannot be
/// edited.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("a gradient needs at least 2 stops, got {count}")]
    #[diagnostic(code(gradient_editor::value::too_few_stops))]
    TooFewStops { count: usize },

    #[error("transform contains NaN or infinite components")]
    #[diagnostic(code(gradient_editor::value::non_finite_transform))]
    NonFiniteTransform,

    #[error("stop {index} has a NaN or infinite offset")]
    #[diagnostic(code(gradient_editor::value::non_finite_offset))]
    NonFiniteOffset { index: usize },
}

// ============================================================================
// Size Errors
// ============================================================================

/// Invalid editor pixel size
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq)]
pub enum SizeError {
    #[error("size is NaN")]
    #[diagnostic(code(gradient_editor::size::nan))]
    NaN,

    #[error("size is infinite")]
    #[diagnostic(code(gradient_editor::size::infinite))]
    Infinite,

    #[error("size must be positive, got {value}")]
    #[diagnostic(code(gradient_editor::size::non_positive))]
    NonPositive { value: f64 },
}

/// Unknown gradient type name
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("unknown gradient type: {found}")]
#[diagnostic(
    code(gradient_editor::unknown_gradient_type),
    help("expected one of `linear`, `radial`, `sweep`")
)]
pub struct ParseGradientTypeError {
    pub found: String,
}

// ============================================================================
// Script Errors
// ============================================================================

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<session>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

/// Errors from parsing or replaying a session script
#[derive(Error, Diagnostic, Debug)]
pub enum ScriptError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(gradient_editor::script::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid value: {message}")]
    #[diagnostic(code(gradient_editor::script::invalid_value))]
    InvalidValue {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("this line")]
        span: SourceSpan,
    },

    #[error("setup after the first event")]
    #[diagnostic(
        code(gradient_editor::script::late_setup),
        help("move `type`, `size`, `stops` and `transform` above the first pointer event")
    )]
    LateSetup {
        #[source_code]
        src: NamedSource<String>,
        #[label("the editor already started")]
        span: SourceSpan,
    },

    #[error("expectation failed: {message}")]
    #[diagnostic(code(gradient_editor::script::expectation_failed))]
    ExpectationFailed {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected here")]
        span: SourceSpan,
    },
}
