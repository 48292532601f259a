//! Token types for the iconscript scanner.
//!
//! The scanner produces three kinds of tokens:
//! - **Identifiers**: `[A-Za-z_][A-Za-z0-9_]*`, used for command words,
//!   variable names, and icon names
//! - **Numbers**: carried as raw source text (an optional `-` followed by
//!   a run of digits and dots); the text is parsed to `f64` only when the
//!   interpreter consumes it
//! - **Punctuation**: `=` `{` `}` `,` `+` `%` `@`, one token per character
//!
//! Whitespace (including newlines) separates tokens and is otherwise
//! insignificant.

use std::fmt;

// ---------------------------------------------------------------------------
// Source location
// ---------------------------------------------------------------------------

/// A byte-offset span in the source input, plus the 1-based line and
/// column of its start for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// 1-based line of the start offset.
    pub line: usize,
    /// 1-based column of the start offset.
    pub column: usize,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A lexical token produced by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind and value of the token.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

/// The kind and payload of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier: command word, variable name, or icon name.
    Ident(String),

    /// A number-like literal, kept as raw source text.
    ///
    /// The scanner merges an optional leading `-` with the following run
    /// of digits and dots without validating it; `--5` or `1.2.3` become
    /// single malformed literals the interpreter rejects.
    Number(String),

    /// `=`
    Equals,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `+` (marks a relative position)
    Plus,
    /// `%` (introduces a name directive)
    Percent,
    /// `@` (introduces a variable reference)
    At,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns `true` if this is an identifier with the given name.
    #[must_use]
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, Self::Ident(s) if s == name)
    }

    /// Returns `true` if this is a number literal.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns `true` if this is end-of-input.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(s) => write!(f, "`{s}`"),
            Self::Number(s) => write!(f, "number `{s}`"),
            Self::Equals => write!(f, "`=`"),
            Self::LBrace => write!(f, "`{{`"),
            Self::RBrace => write!(f, "`}}`"),
            Self::Comma => write!(f, "`,`"),
            Self::Plus => write!(f, "`+`"),
            Self::Percent => write!(f, "`%`"),
            Self::At => write!(f, "`@`"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let s = Span::new(10, 20, 2, 3);
        assert_eq!(s.len(), 10);
        assert!(!s.is_empty());
        assert_eq!(format!("{s}"), "2:3");

        let z = Span::new(5, 5, 1, 6);
        assert_eq!(z.len(), 0);
        assert!(z.is_empty());
    }

    #[test]
    fn token_kind_predicates() {
        assert!(TokenKind::Ident("circle".into()).is_ident("circle"));
        assert!(!TokenKind::Ident("circle".into()).is_ident("line"));
        assert!(TokenKind::Number("3.5".into()).is_number());
        assert!(TokenKind::Eof.is_eof());
    }

    #[test]
    fn token_kind_display() {
        assert_eq!(format!("{}", TokenKind::Ident("arrow".into())), "`arrow`");
        assert_eq!(format!("{}", TokenKind::Number("-2".into())), "number `-2`");
        assert_eq!(format!("{}", TokenKind::LBrace), "`{`");
        assert_eq!(format!("{}", TokenKind::Eof), "end of input");
    }
}
