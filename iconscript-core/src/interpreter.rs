//! Tree-walking interpreter for iconscript.
//!
//! Walks the command tree with explicit, owned state: a cursor, the
//! current stroke width, the variable bindings seen so far, and the
//! shapes of the icon under construction. Variable references re-walk the
//! bound subtree through the same interpreter, so an expansion observes
//! and mutates the cursor and width exactly as if its commands had been
//! written inline.
//!
//! Non-fatal conditions (undefined variables, duplicate icon names) are
//! accumulated as diagnostics and evaluation continues; malformed
//! literals and runaway expansion abort the script.

use std::collections::HashMap;

use iconscript_geometry::types::{Icon, Point, Scalar, Shape};

use crate::ast::{Literal, Node, NodeKind, PositionNode, Script};
use crate::error::{ErrorKind, ScriptError, ScriptResult, Severity};

/// Maximum depth of nested variable expansion.
///
/// Bindings may reference other bindings; a chain deeper than this (in
/// practice, a reference cycle) is a fatal error.
pub const MAX_EXPANSION_DEPTH: usize = 32;

/// The iconscript interpreter.
///
/// Borrows the script for its lifetime: variable bindings are slices into
/// the command tree, re-walked fresh at every reference site.
pub struct Interpreter<'s> {
    /// Current drawing position. Each position evaluation moves it.
    cursor: Point,
    /// Stroke width applied to shapes as they are issued.
    stroke_width: Scalar,
    /// Variable bindings, last assignment wins.
    variables: HashMap<&'s str, &'s [Node]>,
    /// Shapes of the icon currently being built.
    current_shapes: Vec<Shape>,
    /// Explicit name of the current icon, if a directive was seen.
    current_name: Option<String>,
    /// Counter feeding auto-generated icon names.
    icon_counter: u32,
    /// Finished icons in source order.
    icons: Vec<Icon>,
    /// Reference nodes that had no binding when they were walked.
    pending_unresolved: Vec<&'s Node>,
    /// Accumulated warnings and recoverable errors.
    diagnostics: Vec<ScriptError>,
}

impl<'s> Interpreter<'s> {
    /// Create a fresh interpreter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursor: Point::ZERO,
            stroke_width: 1.0,
            variables: HashMap::new(),
            current_shapes: Vec::new(),
            current_name: None,
            icon_counter: 0,
            icons: Vec::new(),
            pending_unresolved: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Interpret a whole script.
    ///
    /// Fatal errors abort and leave the interpreter state partially
    /// advanced; the caller is expected to discard it.
    pub fn run(&mut self, script: &'s Script) -> ScriptResult<()> {
        for node in &script.nodes {
            match &node.kind {
                NodeKind::Assignment { name, body } => {
                    // Bindings become visible here, for the rest of the
                    // walk. Rebinding replaces the previous body.
                    self.variables.insert(name.as_str(), body.as_slice());
                }
                NodeKind::Icon { body } => {
                    self.cursor = Point::ZERO;
                    self.stroke_width = 1.0;
                    self.current_shapes.clear();
                    self.current_name = None;
                    self.walk(body, 0)?;
                    self.finish_icon();
                }
                // The parser only produces assignments and icons at the
                // top level.
                _ => {}
            }
        }
        Ok(())
    }

    /// Finished icons, in the order their blocks closed.
    #[must_use]
    pub fn icons(&self) -> &[Icon] {
        &self.icons
    }

    /// Consume the interpreter, returning the finished icons.
    #[must_use]
    pub fn into_icons(self) -> Vec<Icon> {
        self.icons
    }

    /// Accumulated warnings and recoverable errors.
    #[must_use]
    pub fn diagnostics(&self) -> &[ScriptError] {
        &self.diagnostics
    }

    /// Drain accumulated diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<ScriptError> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Reference nodes that had no binding when they were walked.
    #[must_use]
    pub fn pending_unresolved(&self) -> &[&'s Node] {
        &self.pending_unresolved
    }

    // -- walking --

    fn walk(&mut self, nodes: &'s [Node], depth: usize) -> ScriptResult<()> {
        for node in nodes {
            match &node.kind {
                NodeKind::Name { name } => {
                    // Last directive wins.
                    self.current_name = Some(name.clone());
                }
                NodeKind::Line { filled, points } => {
                    // Positions are always evaluated for their cursor
                    // side effects, even when too few to form a line.
                    let mut pts = Vec::with_capacity(points.len());
                    for p in points {
                        pts.push(self.eval_position(p)?);
                    }
                    if pts.len() >= 2 {
                        let width = self.stroke_width;
                        self.current_shapes.push(if *filled {
                            Shape::LineFilled { points: pts, width }
                        } else {
                            Shape::Line { points: pts, width }
                        });
                    }
                }
                NodeKind::Rectangle { corners } => {
                    let a = self.eval_position(&corners[0])?;
                    let b = self.eval_position(&corners[1])?;
                    self.current_shapes.push(Shape::Rectangle {
                        corners: [a, b],
                        width: self.stroke_width,
                    });
                }
                NodeKind::Circle { center, radius } => {
                    let center = self.eval_position(center)?;
                    let radius = self.eval_literal(radius)?;
                    self.current_shapes.push(Shape::Circle {
                        center,
                        radius,
                        width: self.stroke_width,
                    });
                }
                NodeKind::SetPosition { position } => {
                    self.eval_position(position)?;
                }
                NodeKind::SetWidth { width } => {
                    self.stroke_width = self.eval_literal(width)?;
                }
                NodeKind::Reference { name } => {
                    self.expand_reference(node, name, depth)?;
                }
                // Not produced inside blocks by the parser.
                NodeKind::Assignment { .. } | NodeKind::Icon { .. } => {}
            }
        }
        Ok(())
    }

    fn expand_reference(
        &mut self,
        node: &'s Node,
        name: &str,
        depth: usize,
    ) -> ScriptResult<()> {
        let Some(body) = self.variables.get(name).copied() else {
            self.diagnostics.push(
                ScriptError::new(
                    ErrorKind::UndefinedVariable,
                    format!("undefined variable `{name}`"),
                )
                .with_span(node.span)
                .with_severity(Severity::Warning),
            );
            self.pending_unresolved.push(node);
            return Ok(());
        };

        if depth >= MAX_EXPANSION_DEPTH {
            return Err(ScriptError::new(
                ErrorKind::RecursionLimitExceeded,
                format!("expansion of `{name}` exceeds depth {MAX_EXPANSION_DEPTH}"),
            )
            .with_span(node.span)
            .with_severity(Severity::Fatal));
        }

        self.walk(body, depth + 1)
    }

    // -- evaluation --

    /// Evaluate a position and move the cursor to it.
    fn eval_position(&mut self, pos: &PositionNode) -> ScriptResult<Point> {
        let x = self.eval_literal(&pos.x)?;
        let y = self.eval_literal(&pos.y)?;
        let point = if pos.relative {
            Point::new(self.cursor.x + x, self.cursor.y + y)
        } else {
            Point::new(x, y)
        };
        self.cursor = point;
        Ok(point)
    }

    fn eval_literal(&self, lit: &Literal) -> ScriptResult<Scalar> {
        lit.text.parse::<Scalar>().map_err(|_| {
            ScriptError::new(
                ErrorKind::MalformedLiteral,
                format!("malformed number `{}`", lit.text),
            )
            .with_span(lit.span)
            .with_severity(Severity::Fatal)
        })
    }

    // -- icon lifecycle --

    /// Close the current icon: settle its name, warn about duplicates,
    /// and move its shapes into the finished list.
    ///
    /// The counter advances once per icon, plus once more when it was
    /// consumed for an auto-generated name; three unnamed icons in a row
    /// come out as `icon_0`, `icon_2`, `icon_4`.
    fn finish_icon(&mut self) {
        let name = match self.current_name.take() {
            Some(name) => name,
            None => {
                let name = format!("icon_{}", self.icon_counter);
                self.icon_counter += 1;
                name
            }
        };
        self.icon_counter += 1;

        if self.icons.iter().any(|icon| icon.name == name) {
            self.diagnostics.push(
                ScriptError::new(
                    ErrorKind::DuplicateIconName,
                    format!("duplicate icon name `{name}`"),
                )
                .with_severity(Severity::Warning),
            );
        }

        self.icons
            .push(Icon::new(name, std::mem::take(&mut self.current_shapes)));
    }
}

impl Default for Interpreter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn interpret(source: &str) -> (Vec<Icon>, Vec<ScriptError>) {
        let script = parse(source).unwrap();
        let mut interp = Interpreter::new();
        interp.run(&script).unwrap();
        let diags = interp.take_diagnostics();
        (interp.into_icons(), diags)
    }

    fn interpret_err(source: &str) -> ScriptError {
        let script = parse(source).unwrap();
        let mut interp = Interpreter::new();
        interp.run(&script).unwrap_err()
    }

    fn line_points(shape: &Shape) -> &[Point] {
        match shape {
            Shape::Line { points, .. } | Shape::LineFilled { points, .. } => points,
            other => panic!("expected a line, got {other:?}"),
        }
    }

    // -- positions --

    #[test]
    fn absolute_and_relative_positions_chain() {
        let (icons, _) = interpret("{ l 1,0 +0,1 +-1,0 }");
        let pts = line_points(&icons[0].shapes[0]);
        assert_eq!(pts, &[Point::new(1.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0)]);
    }

    #[test]
    fn absolute_position_replaces_cursor() {
        let (icons, _) = interpret("{ p 5,5 l 2,2 +1,0 }");
        let pts = line_points(&icons[0].shapes[0]);
        assert_eq!(pts, &[Point::new(2.0, 2.0), Point::new(3.0, 2.0)]);
    }

    #[test]
    fn set_position_moves_cursor_without_drawing() {
        let (icons, _) = interpret("{ p 4,4 l +1,0 +0,1 }");
        assert_eq!(icons[0].shapes.len(), 1);
        let pts = line_points(&icons[0].shapes[0]);
        assert_eq!(pts, &[Point::new(5.0, 4.0), Point::new(5.0, 5.0)]);
    }

    #[test]
    fn cursor_resets_between_icons() {
        let (icons, _) = interpret("{ p 9,9 } { l +1,0 +0,1 }");
        let pts = line_points(&icons[1].shapes[0]);
        assert_eq!(pts, &[Point::new(1.0, 0.0), Point::new(1.0, 1.0)]);
    }

    #[test]
    fn single_position_line_moves_cursor_but_draws_nothing() {
        let (icons, _) = interpret("{ l 5,5 l +1,0 +0,2 }");
        assert_eq!(icons[0].shapes.len(), 1);
        let pts = line_points(&icons[0].shapes[0]);
        assert_eq!(pts, &[Point::new(6.0, 5.0), Point::new(6.0, 7.0)]);
    }

    // -- width --

    #[test]
    fn width_applies_to_subsequent_shapes() {
        let (icons, _) = interpret("{ l 0,0 1,1 w 3 l 0,0 1,1 }");
        let widths: Vec<_> = icons[0].shapes.iter().map(Shape::width).collect();
        assert_eq!(widths, vec![1.0, 3.0]);
    }

    #[test]
    fn width_resets_between_icons() {
        let (icons, _) = interpret("{ w 4 l 0,0 1,1 } { l 0,0 1,1 }");
        assert_eq!(icons[0].shapes[0].width(), 4.0);
        assert_eq!(icons[1].shapes[0].width(), 1.0);
    }

    // -- shapes --

    #[test]
    fn circle_radius_taken_verbatim() {
        let (icons, _) = interpret("{ c 8,8 3 }");
        let Shape::Circle { center, radius, .. } = icons[0].shapes[0] else {
            panic!("expected a circle");
        };
        assert_eq!(center, Point::new(8.0, 8.0));
        assert_eq!(radius, 3.0);
    }

    #[test]
    fn circle_center_moves_cursor() {
        let (icons, _) = interpret("{ c 8,8 3 l +1,0 +0,1 }");
        let pts = line_points(&icons[0].shapes[1]);
        assert_eq!(pts[0], Point::new(9.0, 8.0));
    }

    #[test]
    fn rectangle_corners() {
        let (icons, _) = interpret("{ s 1,1 +4,4 }");
        let Shape::Rectangle { corners, .. } = icons[0].shapes[0] else {
            panic!("expected a rectangle");
        };
        assert_eq!(corners, [Point::new(1.0, 1.0), Point::new(5.0, 5.0)]);
    }

    #[test]
    fn filled_line_kind_preserved() {
        let (icons, _) = interpret("{ lf 0,0 4,0 }");
        assert!(matches!(icons[0].shapes[0], Shape::LineFilled { .. }));
    }

    // -- naming --

    #[test]
    fn explicit_name() {
        let (icons, _) = interpret("{ %dot c 8,8 3 }");
        assert_eq!(icons[0].name, "dot");
    }

    #[test]
    fn last_name_directive_wins() {
        let (icons, _) = interpret("{ %first %second }");
        assert_eq!(icons[0].name, "second");
    }

    #[test]
    fn auto_name_cadence() {
        let (icons, _) = interpret("{ } { } { }");
        let names: Vec<_> = icons.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["icon_0", "icon_2", "icon_4"]);
    }

    #[test]
    fn mixed_named_and_auto_cadence() {
        let (icons, _) = interpret("{ %a } { } { %b } { }");
        let names: Vec<_> = icons.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "icon_1", "b", "icon_4"]);
    }

    #[test]
    fn duplicate_names_warn_and_keep_both() {
        let (icons, diags) = interpret("{ %dot } { %dot }");
        assert_eq!(icons.len(), 2);
        assert_eq!(icons[0].name, "dot");
        assert_eq!(icons[1].name, "dot");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, ErrorKind::DuplicateIconName);
        assert_eq!(diags[0].severity, Severity::Warning);
    }

    // -- variables --

    #[test]
    fn reference_expands_binding() {
        let (icons, diags) = interpret("cross = { l 0,0 4,4 }\n{ @cross }");
        assert!(diags.is_empty());
        assert_eq!(icons[0].shapes.len(), 1);
    }

    #[test]
    fn expansion_mutates_cursor_state() {
        // Each expansion continues from where the previous one left off.
        let (icons, _) = interpret("step = { l +1,0 +0,1 }\n{ @step @step }");
        let first = line_points(&icons[0].shapes[0]);
        let second = line_points(&icons[0].shapes[1]);
        assert_eq!(first, &[Point::new(1.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(second, &[Point::new(2.0, 1.0), Point::new(2.0, 2.0)]);
    }

    #[test]
    fn last_assignment_wins() {
        let (icons, _) =
            interpret("v = { l 0,0 1,0 }\nv = { c 8,8 2 }\n{ @v }");
        assert!(matches!(icons[0].shapes[0], Shape::Circle { .. }));
    }

    #[test]
    fn reference_before_assignment_is_undefined() {
        // Bindings become visible only once their assignment is walked.
        let (icons, diags) = interpret("{ @late }\nlate = { c 8,8 2 }\n{ @late }");
        assert!(icons[0].shapes.is_empty());
        assert_eq!(icons[1].shapes.len(), 1);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, ErrorKind::UndefinedVariable);
    }

    #[test]
    fn undefined_reference_warns_with_location() {
        let script = parse("{\n  @missing\n}").unwrap();
        let mut interp = Interpreter::new();
        interp.run(&script).unwrap();
        assert_eq!(interp.pending_unresolved().len(), 1);
        let diag = &interp.diagnostics()[0];
        assert_eq!(diag.severity, Severity::Warning);
        let span = diag.span.unwrap();
        assert_eq!(span.line, 2);
        assert_eq!(span.column, 3);
    }

    #[test]
    fn nested_expansion_within_limit() {
        let (icons, diags) = interpret(
            "a = { l 0,0 1,0 }\nb = { @a @a }\n{ @b }",
        );
        assert!(diags.is_empty());
        assert_eq!(icons[0].shapes.len(), 2);
    }

    #[test]
    fn self_reference_hits_recursion_limit() {
        // References resolve at expansion time, so a binding can reach
        // itself.
        let err = interpret_err("a = { @a }\n{ @a }");
        assert_eq!(err.kind, ErrorKind::RecursionLimitExceeded);
        assert_eq!(err.severity, Severity::Fatal);
    }

    // -- literals --

    #[test]
    fn malformed_width_literal_is_fatal() {
        let err = interpret_err("{ w 1.2.3 }");
        assert_eq!(err.kind, ErrorKind::MalformedLiteral);
        assert_eq!(err.severity, Severity::Fatal);
        assert!(err.message.contains("1.2.3"), "message: {}", err.message);
    }

    #[test]
    fn malformed_coordinate_literal_is_fatal() {
        let err = interpret_err("{ l 0,0 4,- }");
        assert_eq!(err.kind, ErrorKind::MalformedLiteral);
    }

    #[test]
    fn negative_and_decimal_literals_parse() {
        let (icons, _) = interpret("{ l -1.5,0 0,2.25 }");
        let pts = line_points(&icons[0].shapes[0]);
        assert_eq!(pts, &[Point::new(-1.5, 0.0), Point::new(0.0, 2.25)]);
    }

    // -- empty icons --

    #[test]
    fn empty_icon_is_kept() {
        let (icons, _) = interpret("{ }");
        assert_eq!(icons.len(), 1);
        assert!(icons[0].shapes.is_empty());
    }
}
