//! Core types shared across the iconscript system.
//!
//! Shapes are what the interpreter produces: each drawing command becomes
//! one [`Shape`] carrying its geometry payload and the stroke width that
//! was in effect when the command was issued. Shapes are immutable once
//! created and owned by the icon's shape list.

pub use kurbo::Point;

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// Convenience alias for coordinate values.
pub type Scalar = f64;

/// Tolerance for floating-point comparisons.
pub const EPSILON: Scalar = 1e-9;

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

/// A single drawing primitive inside an icon.
///
/// A closed set of variants: the geometry kernel dispatches on shape kind
/// with an exhaustive match, so adding a variant is a compile-time checked
/// change everywhere shapes are consumed.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// An open polyline, rendered as a filled band of the given width.
    Line { points: Vec<Point>, width: Scalar },
    /// Like [`Shape::Line`], but produced by the filled-line command.
    LineFilled { points: Vec<Point>, width: Scalar },
    /// An axis-aligned rectangle spanned by two opposite corners.
    Rectangle { corners: [Point; 2], width: Scalar },
    /// A circle. The exact center/radius identity is kept so that final
    /// serialization can redraw it as Bezier arcs rather than a polygon.
    Circle {
        center: Point,
        radius: Scalar,
        width: Scalar,
    },
}

impl Shape {
    /// The stroke width in effect when this shape was issued.
    #[must_use]
    pub const fn width(&self) -> Scalar {
        match self {
            Self::Line { width, .. }
            | Self::LineFilled { width, .. }
            | Self::Rectangle { width, .. }
            | Self::Circle { width, .. } => *width,
        }
    }
}

// ---------------------------------------------------------------------------
// Icon
// ---------------------------------------------------------------------------

/// A named, ordered collection of shapes.
///
/// Duplicate names are allowed (the interpreter warns about them); the
/// emission layer writes icons in order, so the last duplicate wins on
/// disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub name: String,
    pub shapes: Vec<Shape>,
}

impl Icon {
    #[must_use]
    pub const fn new(name: String, shapes: Vec<Shape>) -> Self {
        Self { name, shapes }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn shape_width_accessor() {
        let line = Shape::Line {
            points: vec![Point::ZERO, Point::new(1.0, 0.0)],
            width: 2.5,
        };
        assert_eq!(line.width(), 2.5);

        let circle = Shape::Circle {
            center: Point::new(5.0, 5.0),
            radius: 2.0,
            width: 1.0,
        };
        assert_eq!(circle.width(), 1.0);
    }

    #[test]
    fn icon_keeps_shape_order() {
        let icon = Icon::new(
            "sample".into(),
            vec![
                Shape::Rectangle {
                    corners: [Point::ZERO, Point::new(1.0, 1.0)],
                    width: 1.0,
                },
                Shape::Circle {
                    center: Point::ZERO,
                    radius: 1.0,
                    width: 1.0,
                },
            ],
        );
        assert_eq!(icon.shapes.len(), 2);
        assert!(matches!(icon.shapes[0], Shape::Rectangle { .. }));
    }
}
