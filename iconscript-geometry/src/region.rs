//! Region construction and boolean union.
//!
//! A [`Region`] is a possibly multi-part filled area with optional holes,
//! backed by [`geo::MultiPolygon`]. Primitive constructors return regions
//! ready for union; degenerate input (too few points, zero-length
//! segments, non-positive radii) degrades to an empty or reduced region
//! and never errors.

use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon};

use crate::types::{Point, Scalar, EPSILON};

/// A possibly multi-part 2D area with optional holes.
pub type Region = MultiPolygon<Scalar>;

/// Number of segments used to approximate a circle as a polygon.
///
/// Only affects union accuracy; serialized circles use exact Bezier arcs.
pub const DISC_SEGMENTS: usize = 64;

/// An empty region.
#[must_use]
pub fn empty() -> Region {
    MultiPolygon::new(Vec::new())
}

fn coord(p: Point) -> Coord<Scalar> {
    Coord { x: p.x, y: p.y }
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// The filled band obtained by offsetting an open polyline by `width / 2`
/// on both sides, with round caps and joins.
///
/// Built as a disc at every vertex plus one quad per segment, all unioned.
/// Fewer than two points yields an empty region.
#[must_use]
pub fn line_band(points: &[Point], width: Scalar) -> Region {
    if points.len() < 2 {
        return empty();
    }

    let radius = width / 2.0;
    let mut parts: Vec<Polygon<Scalar>> = Vec::new();

    for &p in points {
        if let Some(d) = disc_polygon(p, radius) {
            parts.push(d);
        }
    }
    for pair in points.windows(2) {
        if let Some(quad) = segment_quad(pair[0], pair[1], radius) {
            parts.push(quad);
        }
    }

    union_polygons(parts)
}

/// An axis-aligned rectangle spanned by two opposite corners.
///
/// Well-defined (possibly zero-area) even when the corners coincide or
/// the rectangle is degenerate on one axis.
#[must_use]
pub fn rectangle(p1: Point, p2: Point) -> Region {
    let ring = LineString::from(vec![
        (p1.x, p1.y),
        (p2.x, p1.y),
        (p2.x, p2.y),
        (p1.x, p2.y),
        (p1.x, p1.y),
    ]);
    MultiPolygon::new(vec![Polygon::new(ring, Vec::new())])
}

/// A circular region, approximated as a [`DISC_SEGMENTS`]-gon.
///
/// The polygon participates in boolean union only; the caller retains the
/// exact `(center, radius)` identity for serialization.
#[must_use]
pub fn disc(center: Point, radius: Scalar) -> Region {
    match disc_polygon(center, radius) {
        Some(poly) => MultiPolygon::new(vec![poly]),
        None => empty(),
    }
}

/// Boolean union of a shape collection.
///
/// Order-independent; zero inputs yield the empty region.
#[must_use]
pub fn union(regions: &[Region]) -> Region {
    let mut result = empty();
    for region in regions {
        if region.0.is_empty() {
            continue;
        }
        if result.0.is_empty() {
            result = region.clone();
        } else {
            result = result.union(region);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn disc_polygon(center: Point, radius: Scalar) -> Option<Polygon<Scalar>> {
    if radius <= EPSILON {
        return None;
    }

    let mut coords = Vec::with_capacity(DISC_SEGMENTS + 1);
    for i in 0..DISC_SEGMENTS {
        let angle = std::f64::consts::TAU * (i as Scalar) / (DISC_SEGMENTS as Scalar);
        coords.push(Coord {
            x: radius.mul_add(angle.cos(), center.x),
            y: radius.mul_add(angle.sin(), center.y),
        });
    }
    coords.push(coords[0]);

    Some(Polygon::new(LineString::new(coords), Vec::new()))
}

/// The rectangle covering one polyline segment, offset by `radius` on each
/// side. Returns `None` for zero-length segments.
fn segment_quad(from: Point, to: Point, radius: Scalar) -> Option<Polygon<Scalar>> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = dx.hypot(dy);
    if length <= EPSILON {
        return None;
    }

    // Unit perpendicular.
    let px = -dy / length * radius;
    let py = dx / length * radius;

    let ring = LineString::from(vec![
        (from.x + px, from.y + py),
        (to.x + px, to.y + py),
        (to.x - px, to.y - py),
        (from.x - px, from.y - py),
        (from.x + px, from.y + py),
    ]);
    Some(Polygon::new(ring, Vec::new()))
}

fn union_polygons(parts: Vec<Polygon<Scalar>>) -> Region {
    let regions: Vec<Region> = parts
        .into_iter()
        .map(|p| MultiPolygon::new(vec![p]))
        .collect();
    union(&regions)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
