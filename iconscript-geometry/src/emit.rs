//! Icon-level emission: shapes to path data.
//!
//! Converts one [`Icon`] into a single [`PathData`]: each shape is turned
//! into a filled region, all regions are unioned, and the result is
//! serialized with the icon's circles retained as exact Bezier arcs.

use geo::Geometry;

use crate::error::GeometryError;
use crate::path::{self, CircleSpec, PathData};
use crate::region;
use crate::types::{Icon, Shape};

/// The combined path data for one icon.
///
/// Line and filled-line shapes become bands of half their stroke width on
/// each side; rectangles and circles contribute their own footprint. The
/// union of all footprints is serialized, with lone circles redrawn as
/// Bezier arcs instead of their polygonal approximation.
pub fn icon_path_data(icon: &Icon) -> Result<PathData, GeometryError> {
    let mut regions = Vec::with_capacity(icon.shapes.len());
    let mut circles = Vec::new();

    for shape in &icon.shapes {
        match shape {
            Shape::Line { points, width } | Shape::LineFilled { points, width } => {
                regions.push(region::line_band(points, *width));
            }
            Shape::Rectangle { corners, .. } => {
                regions.push(region::rectangle(corners[0], corners[1]));
            }
            Shape::Circle { center, radius, .. } => {
                regions.push(region::disc(*center, *radius));
                circles.push(CircleSpec {
                    center: *center,
                    radius: *radius,
                });
            }
        }
    }

    let unioned = region::union(&regions);
    path::serialize(&Geometry::MultiPolygon(unioned), &circles)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
