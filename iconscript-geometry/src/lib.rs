//! Geometry kernel for the iconscript system.
//!
//! Builds filled 2D regions from drawing primitives (polyline bands,
//! rectangles, discs), merges them with boolean union, and serializes the
//! result into portable path data (straight segments for polygons, cubic
//! Bezier arcs for circles).

pub mod emit;
pub mod error;
pub mod path;
pub mod region;
pub mod types;
