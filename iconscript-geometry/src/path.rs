//! Path serialization.
//!
//! Converts a unioned region (plus the exact circle identities collected
//! during interpretation) into an ordered sequence of path-drawing
//! instructions. Polygon parts become closed move/line/close subpaths;
//! circles become four cubic Bezier segments so that the final artifact
//! keeps exact circular contours instead of faceted polygons.
//!
//! Winding direction is not encoded: holes are emitted as independent
//! closed subpaths and the rendering consumer's fill rule treats inner
//! subpaths as subtractive.

use geo::{Area, Centroid, Geometry, LineString, Polygon};

use crate::error::GeometryError;
use crate::types::{Point, Scalar};

/// Control-point offset factor for approximating a quarter circle with
/// one cubic Bezier segment.
pub const KAPPA: Scalar = 0.552_284_749_8;

// ---------------------------------------------------------------------------
// Path data
// ---------------------------------------------------------------------------

/// One drawing instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bezier: two control points, then the end point.
    CurveTo(Point, Point, Point),
    Close,
}

/// An ordered sequence of drawing instructions describing one or more
/// subpaths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    pub commands: Vec<PathCommand>,
}

impl PathData {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// The exact identity of a circle participating in an icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSpec {
    pub center: Point,
    pub radius: Scalar,
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Serialize a unioned geometry plus circle overrides into [`PathData`].
///
/// Polygon parts whose footprint is exactly one of the circle overrides
/// are skipped (the override's Bezier subpath replaces them); every other
/// part is emitted as a closed subpath for its outer boundary followed by
/// one closed subpath per hole. Circle overrides are then appended as
/// Bezier arcs. A circle merged into larger geometry still appears inside
/// that part's polygon boundary and is additionally retraced as an exact
/// arc; the shared fill makes the double description invisible.
///
/// The only error is [`GeometryError::UnsupportedGeometry`] for geometry
/// kinds the serializer cannot express.
pub fn serialize(
    geometry: &Geometry<Scalar>,
    circles: &[CircleSpec],
) -> Result<PathData, GeometryError> {
    let mut path = PathData::new();
    push_geometry(&mut path, geometry, circles)?;
    for spec in circles {
        push_circle(&mut path, spec);
    }
    Ok(path)
}

fn push_geometry(
    path: &mut PathData,
    geometry: &Geometry<Scalar>,
    circles: &[CircleSpec],
) -> Result<(), GeometryError> {
    match geometry {
        Geometry::Polygon(poly) => {
            push_polygon(path, poly, circles);
            Ok(())
        }
        Geometry::MultiPolygon(mp) => {
            for poly in &mp.0 {
                push_polygon(path, poly, circles);
            }
            Ok(())
        }
        Geometry::LineString(ls) => {
            push_ring(path, ls, false);
            Ok(())
        }
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                push_ring(path, ls, false);
            }
            Ok(())
        }
        Geometry::GeometryCollection(collection) => {
            for inner in &collection.0 {
                push_geometry(path, inner, circles)?;
            }
            Ok(())
        }
        Geometry::Point(_) => Err(GeometryError::UnsupportedGeometry("Point")),
        Geometry::MultiPoint(_) => Err(GeometryError::UnsupportedGeometry("MultiPoint")),
        Geometry::Line(_) => Err(GeometryError::UnsupportedGeometry("Line")),
        Geometry::Rect(_) => Err(GeometryError::UnsupportedGeometry("Rect")),
        Geometry::Triangle(_) => Err(GeometryError::UnsupportedGeometry("Triangle")),
    }
}

fn push_polygon(path: &mut PathData, poly: &Polygon<Scalar>, circles: &[CircleSpec]) {
    if circles.iter().any(|spec| is_circle_footprint(poly, spec)) {
        return;
    }
    push_ring(path, poly.exterior(), true);
    for hole in poly.interiors() {
        push_ring(path, hole, true);
    }
}

fn push_ring(path: &mut PathData, ring: &LineString<Scalar>, close: bool) {
    let mut coords = ring.0.as_slice();
    if coords.is_empty() {
        return;
    }
    // Rings repeat the first coordinate at the end; drop the duplicate.
    if close && coords.len() > 1 && coords[0] == coords[coords.len() - 1] {
        coords = &coords[..coords.len() - 1];
    }

    path.commands
        .push(PathCommand::MoveTo(Point::new(coords[0].x, coords[0].y)));
    for c in &coords[1..] {
        path.commands.push(PathCommand::LineTo(Point::new(c.x, c.y)));
    }
    if close {
        path.commands.push(PathCommand::Close);
    }
}

/// Four cubic Bezier segments tracing a full circle, starting at the
/// rightmost point and proceeding through `(cx, cy + r)`, `(cx - r, cy)`,
/// `(cx, cy - r)` back to the start.
fn push_circle(path: &mut PathData, spec: &CircleSpec) {
    let CircleSpec { center, radius: r } = *spec;
    let (x, y) = (center.x, center.y);
    let k = KAPPA * r;

    path.commands.push(PathCommand::MoveTo(Point::new(x + r, y)));
    path.commands.push(PathCommand::CurveTo(
        Point::new(x + r, y + k),
        Point::new(x + k, y + r),
        Point::new(x, y + r),
    ));
    path.commands.push(PathCommand::CurveTo(
        Point::new(x - k, y + r),
        Point::new(x - r, y + k),
        Point::new(x - r, y),
    ));
    path.commands.push(PathCommand::CurveTo(
        Point::new(x - r, y - k),
        Point::new(x - k, y - r),
        Point::new(x, y - r),
    ));
    path.commands.push(PathCommand::CurveTo(
        Point::new(x + k, y - r),
        Point::new(x + r, y - k),
        Point::new(x + r, y),
    ));
    path.commands.push(PathCommand::Close);
}

/// Whether a unioned part is exactly the polygon footprint of one circle:
/// no holes, centroid at the circle's center, area matching the disc
/// approximation.
fn is_circle_footprint(poly: &Polygon<Scalar>, spec: &CircleSpec) -> bool {
    if !poly.interiors().is_empty() {
        return false;
    }

    let disc_area = std::f64::consts::PI * spec.radius * spec.radius;
    let area = poly.unsigned_area();
    if disc_area <= 0.0 || (area - disc_area).abs() / disc_area > 0.01 {
        return false;
    }

    let Some(centroid) = poly.centroid() else {
        return false;
    };
    let tolerance = 1e-6 * spec.radius.max(1.0);
    (centroid.x() - spec.center.x).abs() < tolerance
        && (centroid.y() - spec.center.y).abs() < tolerance
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
