//! Lexical scanner for iconscript source.
//!
//! # Token production rules
//!
//! | Input               | Token produced                              |
//! |---------------------|---------------------------------------------|
//! | `arrow`, `l`, `x_1` | `Ident("arrow")`, `Ident("l")`, `Ident("x_1")` |
//! | `42`, `3.5`, `-2`   | `Number` carrying the raw text              |
//! | `--5`, `1.2.3`      | `Number` carrying the raw (malformed) text  |
//! | `=` `{` `}` `,` `+` `%` `@` | one punctuation token each          |
//! | whitespace          | Skipped                                     |
//! | end of input        | `Eof`                                       |
//!
//! Number text is deliberately unvalidated: the scanner merges an optional
//! leading `-` with the following run of digits and dots, and the
//! interpreter reports `MalformedLiteral` when the text fails to parse.
//! Any other character is an error; the scanner records it and moves on.

use crate::error::{ErrorKind, ScriptError, Severity};
use crate::token::{Span, Token, TokenKind};

/// Lexical scanner for iconscript source.
pub struct Scanner {
    /// Source bytes (owned).
    src: Vec<u8>,
    /// Current byte position.
    pos: usize,
    /// 1-based line of `pos`.
    line: usize,
    /// 1-based column of `pos`.
    column: usize,
    /// Accumulated errors (non-fatal at the scanner level).
    errors: Vec<ScriptError>,
}

impl Scanner {
    /// Create a new scanner over the given source string.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            src: source.as_bytes().to_vec(),
            pos: 0,
            line: 1,
            column: 1,
            errors: Vec::new(),
        }
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            if self.pos >= self.src.len() {
                return Token {
                    kind: TokenKind::Eof,
                    span: Span::new(self.pos, self.pos, self.line, self.column),
                };
            }

            let start = self.mark();
            let c = self.src[self.pos];

            match c {
                b'=' => return self.punct(start, TokenKind::Equals),
                b'{' => return self.punct(start, TokenKind::LBrace),
                b'}' => return self.punct(start, TokenKind::RBrace),
                b',' => return self.punct(start, TokenKind::Comma),
                b'+' => return self.punct(start, TokenKind::Plus),
                b'%' => return self.punct(start, TokenKind::Percent),
                b'@' => return self.punct(start, TokenKind::At),
                b'0'..=b'9' | b'-' | b'.' => return self.scan_number(start),
                b'A'..=b'Z' | b'a'..=b'z' | b'_' => return self.scan_ident(start),
                _ => {
                    self.bump();
                    self.errors.push(
                        ScriptError::new(
                            ErrorKind::InvalidCharacter,
                            format!("invalid character: {c:#04x}"),
                        )
                        .with_span(self.span_from(start))
                        .with_severity(Severity::Fatal),
                    );
                }
            }
        }
    }

    /// Scan all remaining tokens (including `Eof`).
    pub fn scan_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.kind.is_eof();
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Return accumulated scan errors.
    #[must_use]
    pub fn errors(&self) -> &[ScriptError] {
        &self.errors
    }

    /// Drain accumulated scan errors.
    pub fn take_errors(&mut self) -> Vec<ScriptError> {
        std::mem::take(&mut self.errors)
    }

    // -- internal helpers --

    /// A (position, line, column) bookmark for span construction.
    const fn mark(&self) -> (usize, usize, usize) {
        (self.pos, self.line, self.column)
    }

    fn span_from(&self, start: (usize, usize, usize)) -> Span {
        Span::new(start.0, self.pos, start.1, start.2)
    }

    /// Advance one byte, maintaining line/column.
    fn bump(&mut self) {
        if self.src[self.pos] == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_whitespace() {
            self.bump();
        }
    }

    fn punct(&mut self, start: (usize, usize, usize), kind: TokenKind) -> Token {
        self.bump();
        Token {
            kind,
            span: self.span_from(start),
        }
    }

    /// Scan a number-like literal: an optional leading `-`, then a run of
    /// digits and dots, taken verbatim. Validation happens at the
    /// consumption site.
    fn scan_number(&mut self, start: (usize, usize, usize)) -> Token {
        if self.src[self.pos] == b'-' {
            self.bump();
        }
        while self.pos < self.src.len()
            && (self.src[self.pos].is_ascii_digit() || self.src[self.pos] == b'.')
        {
            self.bump();
        }

        let text = String::from_utf8_lossy(&self.src[start.0..self.pos]).into_owned();
        Token {
            kind: TokenKind::Number(text),
            span: self.span_from(start),
        }
    }

    fn scan_ident(&mut self, start: (usize, usize, usize)) -> Token {
        while self.pos < self.src.len()
            && (self.src[self.pos].is_ascii_alphanumeric() || self.src[self.pos] == b'_')
        {
            self.bump();
        }

        let text = String::from_utf8_lossy(&self.src[start.0..self.pos]).into_owned();
        Token {
            kind: TokenKind::Ident(text),
            span: self.span_from(start),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
