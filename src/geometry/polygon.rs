//! Convex polygons built from point sets.

use super::{cross, Point, GEOMETRY_EPSILON};
use std::cmp::Ordering;

/// A convex polygon with vertices in counter-clockwise order.
///
/// Only constructed through [`Polygon::convex_hull`], so the vertex list is
/// always convex and free of collinear vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Computes the convex hull of `points` (Andrew's monotone chain).
    ///
    /// Duplicate and collinear points are dropped. With fewer than three
    /// non-collinear input points the result is degenerate (fewer than
    /// three vertices, zero area).
    ///
    /// # Complexity
    /// O(n log n)
    pub fn convex_hull<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut pts: Vec<Point> = points
            .into_iter()
            .map(|p| Point::new(p.x(), p.y()))
            .collect();
        pts.sort_by(|a, b| match a.x().total_cmp(&b.x()) {
            Ordering::Equal => a.y().total_cmp(&b.y()),
            other => other,
        });
        pts.dedup();

        if pts.len() < 3 {
            return Self { vertices: pts };
        }

        let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
        for p in &pts {
            while lower.len() >= 2
                && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= GEOMETRY_EPSILON
            {
                lower.pop();
            }
            lower.push(p.clone());
        }

        let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
        for p in pts.iter().rev() {
            while upper.len() >= 2
                && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= GEOMETRY_EPSILON
            {
                upper.pop();
            }
            upper.push(p.clone());
        }

        lower.pop();
        upper.pop();
        lower.extend(upper);
        Self { vertices: lower }
    }

    /// Hull vertices, counter-clockwise.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Returns `true` if the polygon has fewer than three vertices.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Enclosed area (shoelace formula).
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = &self.vertices[i];
                let b = &self.vertices[(i + 1) % n];
                a.x() * b.y() - b.x() * a.y()
            })
            .sum();
        twice.abs() / 2.0
    }

    /// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
    ///
    /// An empty polygon reports all-zero bounds.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        if self.vertices.is_empty() {
            return (0.0, 0.0, 0.0, 0.0);
        }
        self.vertices.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(min_x, min_y, max_x, max_y), p| {
                (
                    min_x.min(p.x()),
                    min_y.min(p.y()),
                    max_x.max(p.x()),
                    max_y.max(p.y()),
                )
            },
        )
    }

    /// Returns `true` if `p` lies inside the polygon or on its boundary.
    ///
    /// Degenerate polygons contain nothing.
    pub fn contains(&self, p: &Point) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        (0..n).all(|i| {
            let a = &self.vertices[i];
            let b = &self.vertices[(i + 1) % n];
            let edge_len = a.distance(b).max(1.0);
            cross(a, b, p) >= -GEOMETRY_EPSILON * edge_len
        })
    }
}
