//! Recursive-descent parser for iconscript.
//!
//! Builds the command tree from the scanner's token stream. Parsing is
//! all-or-nothing for a script: the first syntax or scan error is fatal
//! and aborts with that error. Recoverable conditions (undefined
//! variables, malformed literal text) are deferred to the interpreter.

use crate::ast::{Literal, Node, NodeKind, PositionNode, Script};
use crate::error::{ErrorKind, ScriptError, ScriptResult, Severity};
use crate::scanner::Scanner;
use crate::token::{Span, Token, TokenKind};

/// Parse a complete source string into a [`Script`].
pub fn parse(source: &str) -> ScriptResult<Script> {
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan_all();
    if let Some(err) = scanner.take_errors().into_iter().next() {
        return Err(err);
    }

    Parser::new(tokens).script()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    const fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    // -- token stream access --

    fn peek(&self) -> &Token {
        // The stream always ends with Eof, so pos stays in bounds.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek2(&self) -> &TokenKind {
        let idx = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn unexpected(&self, expected: &str) -> ScriptError {
        let tok = self.peek();
        ScriptError::new(
            ErrorKind::UnexpectedToken,
            format!("expected {expected}, found {}", tok.kind),
        )
        .with_span(tok.span)
        .with_severity(Severity::Fatal)
    }

    fn expect_ident(&mut self, expected: &str) -> ScriptResult<(String, Span)> {
        match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok((name, span))
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn expect_number(&mut self) -> ScriptResult<Literal> {
        match self.peek().kind.clone() {
            TokenKind::Number(text) => {
                let span = self.advance().span;
                Ok(Literal { text, span })
            }
            _ => Err(self.unexpected("a number")),
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> ScriptResult<Span> {
        if &self.peek().kind == kind {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(expected))
        }
    }

    // -- grammar --

    /// `script := ( assignment | icon )*`
    fn script(mut self) -> ScriptResult<Script> {
        let mut nodes = Vec::new();
        loop {
            match &self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Ident(_) if *self.peek2() == TokenKind::Equals => {
                    nodes.push(self.assignment()?);
                }
                TokenKind::LBrace => nodes.push(self.icon()?),
                _ => return Err(self.unexpected("an assignment or `{`")),
            }
        }
        Ok(Script { nodes })
    }

    /// `assignment := IDENT '=' '{' command* '}'`
    fn assignment(&mut self) -> ScriptResult<Node> {
        let (name, start) = self.expect_ident("a variable name")?;
        self.expect(&TokenKind::Equals, "`=`")?;
        let (body, end) = self.block()?;
        Ok(Node {
            kind: NodeKind::Assignment { name, body },
            span: join(start, end),
        })
    }

    /// `icon := '{' command* '}'`
    fn icon(&mut self) -> ScriptResult<Node> {
        let (body, span) = self.block_from(self.peek().span)?;
        Ok(Node {
            kind: NodeKind::Icon { body },
            span,
        })
    }

    fn block(&mut self) -> ScriptResult<(Vec<Node>, Span)> {
        let open = self.peek().span;
        let (body, span) = self.block_from(open)?;
        Ok((body, span))
    }

    /// Parse `'{' command* '}'`, returning the body and the full span.
    fn block_from(&mut self, open: Span) -> ScriptResult<(Vec<Node>, Span)> {
        self.expect(&TokenKind::LBrace, "`{`")?;
        let mut body = Vec::new();
        loop {
            match &self.peek().kind {
                TokenKind::RBrace => {
                    let close = self.advance().span;
                    return Ok((body, join(open, close)));
                }
                TokenKind::Eof => {
                    return Err(ScriptError::new(
                        ErrorKind::UnbalancedDelimiter,
                        "unclosed `{`",
                    )
                    .with_span(open)
                    .with_severity(Severity::Fatal));
                }
                _ => body.push(self.command()?),
            }
        }
    }

    /// One command inside a block.
    fn command(&mut self) -> ScriptResult<Node> {
        match self.peek().kind.clone() {
            TokenKind::Percent => {
                let start = self.advance().span;
                let (name, end) = self.expect_ident("an icon name")?;
                Ok(Node {
                    kind: NodeKind::Name { name },
                    span: join(start, end),
                })
            }
            TokenKind::At => {
                let start = self.advance().span;
                let (name, end) = self.expect_ident("a variable name")?;
                Ok(Node {
                    kind: NodeKind::Reference { name },
                    span: join(start, end),
                })
            }
            TokenKind::Ident(word) => {
                let start = self.advance().span;
                self.drawing_command(&word, start)
            }
            _ => Err(self.unexpected("a command")),
        }
    }

    fn drawing_command(&mut self, word: &str, start: Span) -> ScriptResult<Node> {
        match word {
            "l" | "lf" => {
                let points = self.positions()?;
                let end = points.last().map_or(start, |p| p.y.span);
                Ok(Node {
                    kind: NodeKind::Line {
                        filled: word == "lf",
                        points,
                    },
                    span: join(start, end),
                })
            }
            "s" => {
                let a = self.position()?;
                let b = self.position()?;
                let end = b.y.span;
                Ok(Node {
                    kind: NodeKind::Rectangle { corners: [a, b] },
                    span: join(start, end),
                })
            }
            "c" => {
                let center = self.position()?;
                let radius = self.expect_number()?;
                let end = radius.span;
                Ok(Node {
                    kind: NodeKind::Circle { center, radius },
                    span: join(start, end),
                })
            }
            "p" => {
                let position = self.position()?;
                let end = position.y.span;
                Ok(Node {
                    kind: NodeKind::SetPosition { position },
                    span: join(start, end),
                })
            }
            "w" => {
                let width = self.expect_number()?;
                let end = width.span;
                Ok(Node {
                    kind: NodeKind::SetWidth { width },
                    span: join(start, end),
                })
            }
            other => Err(ScriptError::new(
                ErrorKind::UnexpectedToken,
                format!("unknown command `{other}`"),
            )
            .with_span(start)
            .with_severity(Severity::Fatal)),
        }
    }

    /// Zero or more positions, as many as the lookahead allows. Commands
    /// that need a minimum count enforce it at interpretation time so
    /// that position side effects still apply.
    fn positions(&mut self) -> ScriptResult<Vec<PositionNode>> {
        let mut points = Vec::new();
        while matches!(self.peek().kind, TokenKind::Plus | TokenKind::Number(_)) {
            points.push(self.position()?);
        }
        Ok(points)
    }

    /// `position := '+'? NUMBER ',' NUMBER`
    fn position(&mut self) -> ScriptResult<PositionNode> {
        let relative = if self.peek().kind == TokenKind::Plus {
            self.advance();
            true
        } else {
            false
        };
        let x = self.expect_number()?;
        self.expect(&TokenKind::Comma, "`,`")?;
        let y = self.expect_number()?;
        Ok(PositionNode { x, y, relative })
    }
}

const fn join(a: Span, b: Span) -> Span {
    Span::new(a.start, b.end, a.line, a.column)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
