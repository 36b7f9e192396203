//! Planar geometry primitives.
//!
//! Primitives used by the floor-plan lattice:
//!
//! - [`Point`]: a hashable coordinate with a lazily cached 4-neighborhood
//! - [`Segment`]: a closed line segment with an intersection test
//! - [`Polygon`]: a convex polygon built as the hull of a point set, with
//!   boundary-inclusive containment
//!
//! All predicates use [`GEOMETRY_EPSILON`] so that lattice points produced
//! by repeated `origin + i * spacing` arithmetic land consistently on
//! boundaries.
//!
//! # References
//!
//! - Andrew (1979), "Another efficient algorithm for convex hulls in two dimensions"
//! - Cormen et al. (2009), *Introduction to Algorithms*, §33.1 (segment intersection)

mod point;
mod polygon;
mod segment;

pub use point::Point;
pub use polygon::Polygon;
pub use segment::Segment;

/// Absolute tolerance for orientation and containment predicates.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Z component of `(b - a) x (c - a)`.
///
/// Positive when `a -> b -> c` turns counter-clockwise.
pub(crate) fn cross(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x() - a.x()) * (c.y() - a.y()) - (b.y() - a.y()) * (c.x() - a.x())
}
