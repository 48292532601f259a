//! SVG renderer for iconscript path data.
//!
//! Converts a [`PathData`] into an SVG [`Document`] using the `svg` crate.
//!
//! Key design points:
//! - Icons live on a fixed square canvas (`viewBox="0 0 16 16"` by
//!   default); no bounding-box computation.
//! - One `<path>` per icon, `fill="black"` and `stroke="none"`. The
//!   default nonzero fill rule plus the union's ring orientation makes
//!   hole subpaths subtractive and circle retraces invisible.
//! - Path data is built as raw `d` strings to preserve `f64` precision
//!   (the `svg` crate's `Data` builder uses `f32`).

use iconscript_geometry::path::{PathCommand, PathData};
use iconscript_geometry::types::Scalar;
use svg::node::element::Path as SvgPath;
use svg::Document;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a [`PathData`] to an SVG [`Document`].
#[must_use]
pub fn render(path: &PathData) -> Document {
    render_with_options(path, &RenderOptions::default())
}

/// Render a [`PathData`] to an SVG string.
#[must_use]
pub fn render_to_string(path: &PathData) -> String {
    render(path).to_string()
}

/// Options controlling SVG output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Side length of the square canvas. Default: 16.
    pub size: Scalar,
    /// Number of decimal places for coordinates. Default: 4.
    pub precision: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 16.0,
            precision: 4,
        }
    }
}

/// Render a [`PathData`] to an SVG [`Document`] with custom options.
#[must_use]
pub fn render_with_options(path: &PathData, opts: &RenderOptions) -> Document {
    let size = fmt_scalar(opts.size, opts.precision);
    let doc = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("viewBox", format!("0 0 {size} {size}"))
        .set("width", size.clone())
        .set("height", size);

    let d = path_data_to_d(path, opts.precision);
    if d.is_empty() {
        return doc;
    }

    doc.add(
        SvgPath::new()
            .set("d", d)
            .set("fill", "black")
            .set("stroke", "none"),
    )
}

// ---------------------------------------------------------------------------
// Path → SVG "d" attribute
// ---------------------------------------------------------------------------

/// Convert [`PathData`] to an SVG path data string (M, L, C, Z).
fn path_data_to_d(path: &PathData, precision: usize) -> String {
    let mut d = String::with_capacity(path.commands.len() * 16);
    for cmd in &path.commands {
        match *cmd {
            PathCommand::MoveTo(p) => {
                d.push('M');
                write_point(&mut d, p.x, p.y, precision);
            }
            PathCommand::LineTo(p) => {
                d.push('L');
                write_point(&mut d, p.x, p.y, precision);
            }
            PathCommand::CurveTo(c1, c2, p) => {
                d.push('C');
                write_point(&mut d, c1.x, c1.y, precision);
                d.push(' ');
                write_point(&mut d, c2.x, c2.y, precision);
                d.push(' ');
                write_point(&mut d, p.x, p.y, precision);
            }
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

/// Write "x,y" to the string with the given precision, stripping
/// trailing zeros.
///
/// Normalizes negative zero to positive zero for cleaner output.
fn write_point(d: &mut String, x: Scalar, y: Scalar, precision: usize) {
    let x = if x == 0.0 { 0.0 } else { x };
    let y = if y == 0.0 { 0.0 } else { y };
    d.push_str(&fmt_scalar(x, precision));
    d.push(',');
    d.push_str(&fmt_scalar(y, precision));
}

/// Format a scalar to the given precision, stripping trailing zeros.
fn fmt_scalar(v: Scalar, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    // Strip trailing zeros after decimal point, but keep at least one digit.
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        trimmed.to_owned()
    } else {
        s
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
