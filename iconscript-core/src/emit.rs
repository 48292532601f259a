//! Script-level emission driver.
//!
//! Ties the pipeline together: interpret a parsed script into icons,
//! then turn each icon's shapes into one unioned path. A geometry
//! failure skips that icon with an error diagnostic; the rest of the
//! script still emits.

use iconscript_geometry::emit::icon_path_data;
use iconscript_geometry::path::PathData;

use crate::ast::Script;
use crate::error::{ErrorKind, ScriptError, ScriptResult, Severity};
use crate::interpreter::Interpreter;

/// The result of evaluating one script.
#[derive(Debug)]
pub struct Evaluation {
    /// `(icon name, path data)` in emission order.
    pub paths: Vec<(String, PathData)>,
    /// Warnings and per-icon errors accumulated along the way.
    pub diagnostics: Vec<ScriptError>,
}

/// Evaluate a parsed script into per-icon path data.
///
/// Returns `Err` only for script-fatal conditions (malformed literals,
/// runaway expansion); everything else is reported through
/// [`Evaluation::diagnostics`].
pub fn evaluate(script: &Script) -> ScriptResult<Evaluation> {
    let mut interp = Interpreter::new();
    interp.run(script)?;

    let mut diagnostics = interp.take_diagnostics();
    let icons = interp.into_icons();

    let mut paths = Vec::with_capacity(icons.len());
    for icon in &icons {
        match icon_path_data(icon) {
            Ok(path) => paths.push((icon.name.clone(), path)),
            Err(err) => diagnostics.push(
                ScriptError::new(
                    ErrorKind::UnsupportedGeometry,
                    format!("skipping icon `{}`: {err}", icon.name),
                )
                .with_severity(Severity::Error),
            ),
        }
    }

    Ok(Evaluation { paths, diagnostics })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use iconscript_geometry::path::PathCommand;
    use iconscript_geometry::types::Point;

    fn evaluate_source(source: &str) -> Evaluation {
        evaluate(&parse(source).unwrap()).unwrap()
    }

    fn shoelace_area(path: &PathData) -> f64 {
        let mut total = 0.0;
        let mut start = Point::ZERO;
        let mut prev = Point::ZERO;
        for cmd in &path.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    start = p;
                    prev = p;
                }
                PathCommand::LineTo(p) => {
                    total += prev.x * p.y - p.x * prev.y;
                    prev = p;
                }
                PathCommand::CurveTo(_, _, p) => {
                    prev = p;
                }
                PathCommand::Close => {
                    total += prev.x * start.y - start.x * prev.y;
                    prev = start;
                }
            }
        }
        (total / 2.0).abs()
    }

    #[test]
    fn band_scenario_end_to_end() {
        // A length-10, width-1 stroke: one subpath, area of the band
        // plus its two round caps, no holes.
        let eval = evaluate_source("{ %foo l 0,0 10,0 }");
        assert!(eval.diagnostics.is_empty());
        assert_eq!(eval.paths.len(), 1);

        let (name, path) = &eval.paths[0];
        assert_eq!(name, "foo");
        let moves = path
            .commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count();
        assert_eq!(moves, 1, "expected a single subpath without holes");

        let expected = 10.0 + std::f64::consts::PI * 0.25;
        let area = shoelace_area(path);
        assert!(
            (area - expected).abs() < 0.05,
            "area {area}, expected about {expected}"
        );
    }

    #[test]
    fn circle_emits_bezier_path() {
        let eval = evaluate_source("{ %dot c 5,5 2 }");
        let (_, path) = &eval.paths[0];
        assert_eq!(path.commands.len(), 6);
        assert!(matches!(
            path.commands[0],
            PathCommand::MoveTo(p) if (p.x - 7.0).abs() < 1e-9 && (p.y - 5.0).abs() < 1e-9
        ));
    }

    #[test]
    fn empty_icon_produces_empty_path() {
        let eval = evaluate_source("{ %blank }");
        assert_eq!(eval.paths.len(), 1);
        assert!(eval.paths[0].1.is_empty());
    }

    #[test]
    fn warnings_surface_in_evaluation() {
        let eval = evaluate_source("{ %a @missing } { %a }");
        assert_eq!(eval.paths.len(), 2);
        assert_eq!(eval.diagnostics.len(), 2);
        assert_eq!(eval.diagnostics[0].kind, ErrorKind::UndefinedVariable);
        assert_eq!(eval.diagnostics[1].kind, ErrorKind::DuplicateIconName);
    }

    #[test]
    fn fatal_error_propagates() {
        let err = evaluate(&parse("{ w 0..5 }").unwrap()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLiteral);
    }
}
