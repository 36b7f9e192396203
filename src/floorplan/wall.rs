//! Wall polylines.

use crate::error::{Result, SitingError};
use crate::geometry::{Point, Segment};

/// A boundary polyline of at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    points: Vec<Point>,
}

impl Wall {
    /// Creates a wall from its polyline vertices.
    ///
    /// # Errors
    ///
    /// [`SitingError::InvalidGeometry`] if fewer than two points are given
    /// or any coordinate is NaN or infinite.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() < 2 {
            return Err(SitingError::InvalidGeometry(format!(
                "a wall needs at least 2 points, got {}",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(SitingError::InvalidGeometry(format!(
                "wall coordinate ({}, {}) is not a finite number",
                bad.x(),
                bad.y()
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consecutive segments of the polyline.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(&w[0], &w[1]))
    }

    /// Returns `true` if any segment of the wall meets `ray` away from the
    /// ray's endpoints.
    ///
    /// A lattice point lying on the wall, or a source placed on it, is not
    /// behind that wall.
    pub fn blocks(&self, ray: &Segment) -> bool {
        self.segments().any(|s| s.meets_interior_of(ray))
    }
}
