//! Command tree for iconscript programs.
//!
//! The parser produces this tree; the interpreter only reads it and may
//! re-walk any subtree (variable expansion happens by walking the bound
//! node list again), so nodes are never mutated after parsing.
//!
//! Numeric literals are carried as raw source text plus span. They are
//! parsed to `f64` at the consumption site so that a malformed literal is
//! reported where it is used, with its exact source location.

use crate::token::Span;

/// A parsed script: top-level assignments and icon blocks in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub nodes: Vec<Node>,
}

/// One node of the command tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

/// The command payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// `name = { ... }` — binds a reusable command group.
    Assignment { name: String, body: Vec<Node> },
    /// `{ ... }` — an icon block.
    Icon { body: Vec<Node> },
    /// `%name` — names the current icon.
    Name { name: String },
    /// `l` / `lf` — an open polyline (two or more positions).
    Line {
        filled: bool,
        points: Vec<PositionNode>,
    },
    /// `s` — an axis-aligned rectangle between two corners.
    Rectangle { corners: [PositionNode; 2] },
    /// `c` — a circle at a position with a literal radius.
    Circle {
        center: PositionNode,
        radius: Literal,
    },
    /// `p` — moves the cursor without drawing.
    SetPosition { position: PositionNode },
    /// `w` — sets the stroke width for subsequent shapes.
    SetWidth { width: Literal },
    /// `@name` — expands a bound command group in place.
    Reference { name: String },
}

/// A coordinate pair, absolute or relative to the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionNode {
    pub x: Literal,
    pub y: Literal,
    /// `true` when the position was written with a leading `+`.
    pub relative: bool,
}

/// A number-like literal as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub text: String,
    pub span: Span,
}
