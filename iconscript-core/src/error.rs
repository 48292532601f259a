//! Error types for the iconscript parser and interpreter.

use std::fmt;

use crate::token::Span;

// ---------------------------------------------------------------------------
// Error severity
// ---------------------------------------------------------------------------

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Warning (evaluation continues).
    Warning,
    /// Error (evaluation continues with recovery, e.g. one icon skipped).
    Error,
    /// Fatal error (evaluation of the current script stops).
    Fatal,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// An error or diagnostic produced while scanning, parsing, interpreting,
/// or emitting a script.
#[derive(Debug, Clone)]
pub struct ScriptError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Source location, if available.
    pub span: Option<Span>,
    /// Severity.
    pub severity: Severity,
}

impl ScriptError {
    /// Create a new error with [`Severity::Error`].
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            severity: Severity::Error,
        }
    }

    /// Attach a source span.
    #[must_use]
    pub const fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Set severity.
    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = self.span {
            write!(f, "[{span}] ")?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ScriptError {}

// ---------------------------------------------------------------------------
// Error kinds
// ---------------------------------------------------------------------------

/// Categories of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // -- Scan errors --
    /// Invalid character in input.
    InvalidCharacter,

    // -- Parse errors --
    /// Unexpected token.
    UnexpectedToken,
    /// Unbalanced braces.
    UnbalancedDelimiter,

    // -- Runtime errors --
    /// A number literal did not parse as `f64`.
    MalformedLiteral,
    /// Reference to a variable with no binding.
    UndefinedVariable,
    /// Two icons ended with the same name.
    DuplicateIconName,
    /// Variable expansion exceeded the depth limit.
    RecursionLimitExceeded,

    // -- Emission errors --
    /// The path serializer met a geometry kind it cannot express.
    UnsupportedGeometry,

    // -- I/O --
    /// File I/O error.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter => write!(f, "invalid character"),
            Self::UnexpectedToken => write!(f, "unexpected token"),
            Self::UnbalancedDelimiter => write!(f, "unbalanced delimiter"),
            Self::MalformedLiteral => write!(f, "malformed literal"),
            Self::UndefinedVariable => write!(f, "undefined variable"),
            Self::DuplicateIconName => write!(f, "duplicate icon name"),
            Self::RecursionLimitExceeded => write!(f, "recursion limit exceeded"),
            Self::UnsupportedGeometry => write!(f, "unsupported geometry"),
            Self::Io => write!(f, "I/O error"),
        }
    }
}

/// Convenience type alias for results using [`ScriptError`].
pub type ScriptResult<T> = Result<T, ScriptError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_with_span() {
        let err = ScriptError::new(ErrorKind::UnexpectedToken, "expected `{`")
            .with_span(Span::new(10, 11, 2, 5));
        let s = format!("{err}");
        assert!(s.contains("[2:5]"), "missing location: {s}");
        assert!(s.contains("expected `{`"), "missing message: {s}");
    }

    #[test]
    fn error_display_without_span() {
        let err = ScriptError::new(ErrorKind::Io, "cannot read input");
        let s = format!("{err}");
        assert!(!s.contains('['), "should not have location: {s}");
        assert!(s.contains("cannot read input"), "missing message: {s}");
    }

    #[test]
    fn severity_defaults_to_error() {
        let err = ScriptError::new(ErrorKind::UndefinedVariable, "no binding for `@x`");
        assert_eq!(err.severity, Severity::Error);
        let warn = err.with_severity(Severity::Warning);
        assert_eq!(warn.severity, Severity::Warning);
    }
}
