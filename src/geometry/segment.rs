//! Closed line segments.

use super::{cross, Point, GEOMETRY_EPSILON};

/// A closed segment between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    /// Creates a segment. Neighbor caches of the endpoints are not copied.
    pub fn new(start: &Point, end: &Point) -> Self {
        Self {
            start: Point::new(start.x(), start.y()),
            end: Point::new(end.x(), end.y()),
        }
    }

    pub fn start(&self) -> &Point {
        &self.start
    }

    pub fn end(&self) -> &Point {
        &self.end
    }

    /// Returns `true` if the two segments share at least one point.
    ///
    /// Proper crossings, an endpoint touching the other segment and
    /// collinear overlap all count as intersections.
    pub fn intersects(&self, other: &Segment) -> bool {
        let (p1, p2) = (&self.start, &self.end);
        let (q1, q2) = (&other.start, &other.end);

        let d1 = orientation(q1, q2, p1);
        let d2 = orientation(q1, q2, p2);
        let d3 = orientation(p1, p2, q1);
        let d4 = orientation(p1, p2, q2);

        if d1 * d2 < 0 && d3 * d4 < 0 {
            return true;
        }

        (d1 == 0 && within_box(q1, q2, p1))
            || (d2 == 0 && within_box(q1, q2, p2))
            || (d3 == 0 && within_box(p1, p2, q1))
            || (d4 == 0 && within_box(p1, p2, q2))
    }

    /// Returns `true` if this segment meets `ray` anywhere other than at
    /// the ray's own endpoints.
    ///
    /// A ray that merely starts or ends on this segment is not crossed by
    /// it. Proper crossings, this segment's endpoints lying strictly inside
    /// the ray, and collinear overlap beyond a single ray endpoint all
    /// count. A zero-length ray meets nothing.
    pub fn meets_interior_of(&self, ray: &Segment) -> bool {
        let (p1, p2) = (&ray.start, &ray.end);
        let (q1, q2) = (&self.start, &self.end);
        if p1.distance(p2) <= GEOMETRY_EPSILON || !self.intersects(ray) {
            return false;
        }

        let d1 = orientation(q1, q2, p1);
        let d2 = orientation(q1, q2, p2);
        let d3 = orientation(p1, p2, q1);
        let d4 = orientation(p1, p2, q2);

        if d1 * d2 < 0 && d3 * d4 < 0 {
            return true;
        }

        if d3 == 0 && d4 == 0 {
            // collinear: overlap of the two parameter ranges along the ray
            let (a, b) = (ray_param(p1, p2, q1), ray_param(p1, p2, q2));
            let lo = a.min(b).max(0.0);
            let hi = a.max(b).min(1.0);
            return hi >= lo && hi > GEOMETRY_EPSILON && lo < 1.0 - GEOMETRY_EPSILON;
        }

        let inside_ray = |q: &Point| {
            within_box(p1, p2, q)
                && q.distance(p1) > GEOMETRY_EPSILON
                && q.distance(p2) > GEOMETRY_EPSILON
        };
        (d3 == 0 && inside_ray(q1)) || (d4 == 0 && inside_ray(q2))
    }
}

/// Position of `q` projected onto `a -> b`, with `a` at 0 and `b` at 1.
fn ray_param(a: &Point, b: &Point, q: &Point) -> f64 {
    let (dx, dy) = (b.x() - a.x(), b.y() - a.y());
    ((q.x() - a.x()) * dx + (q.y() - a.y()) * dy) / (dx * dx + dy * dy)
}

/// Sign of the turn `a -> b -> c`: 1 (ccw), -1 (cw) or 0 (collinear).
fn orientation(a: &Point, b: &Point, c: &Point) -> i8 {
    let v = cross(a, b, c);
    if v > GEOMETRY_EPSILON {
        1
    } else if v < -GEOMETRY_EPSILON {
        -1
    } else {
        0
    }
}

/// Whether `p` lies in the bounding box of `a`-`b`. Only meaningful for
/// points already known to be collinear with the segment.
fn within_box(a: &Point, b: &Point, p: &Point) -> bool {
    p.x() >= a.x().min(b.x()) - GEOMETRY_EPSILON
        && p.x() <= a.x().max(b.x()) + GEOMETRY_EPSILON
        && p.y() >= a.y().min(b.y()) - GEOMETRY_EPSILON
        && p.y() <= a.y().max(b.y()) + GEOMETRY_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(&Point::new(ax, ay), &Point::new(bx, by))
    }

    #[test]
    fn test_proper_crossing() {
        assert!(seg(0.0, 0.0, 4.0, 4.0).intersects(&seg(0.0, 4.0, 4.0, 0.0)));
    }

    #[test]
    fn test_disjoint() {
        assert!(!seg(0.0, 0.0, 1.0, 1.0).intersects(&seg(2.0, 0.0, 3.0, -1.0)));
        assert!(!seg(0.0, 0.0, 4.0, 0.0).intersects(&seg(0.0, 1.0, 4.0, 1.0)));
    }

    #[test]
    fn test_touching_endpoint() {
        assert!(seg(0.0, 0.0, 2.0, 2.0).intersects(&seg(2.0, 2.0, 4.0, 0.0)));
        // T-junction
        assert!(seg(0.0, 0.0, 4.0, 0.0).intersects(&seg(2.0, 0.0, 2.0, 3.0)));
    }

    #[test]
    fn test_collinear() {
        assert!(seg(0.0, 0.0, 4.0, 0.0).intersects(&seg(3.0, 0.0, 6.0, 0.0)));
        assert!(!seg(0.0, 0.0, 2.0, 0.0).intersects(&seg(3.0, 0.0, 6.0, 0.0)));
    }

    // ---- ray interior ----

    #[test]
    fn test_ray_ending_on_segment_is_not_crossed() {
        let wall = seg(0.0, 0.0, 0.0, 4.0);
        assert!(!wall.meets_interior_of(&seg(2.0, 2.0, 0.0, 2.0)));
        assert!(!wall.meets_interior_of(&seg(0.0, 2.0, 2.0, 2.0)));
        // ray ending on the wall's own endpoint (room corner)
        assert!(!wall.meets_interior_of(&seg(2.0, 2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_ray_crossing_segment() {
        let wall = seg(0.0, 0.0, 0.0, 4.0);
        assert!(wall.meets_interior_of(&seg(-1.0, 2.0, 1.0, 2.0)));
        // wall endpoint strictly inside the ray
        assert!(wall.meets_interior_of(&seg(-1.0, 4.0, 1.0, 4.0)));
        assert!(!wall.meets_interior_of(&seg(1.0, 1.0, 3.0, 3.0)));
    }

    #[test]
    fn test_ray_collinear_with_segment() {
        let wall = seg(0.0, 0.0, 0.0, 4.0);
        assert!(wall.meets_interior_of(&seg(0.0, 1.0, 0.0, 3.0)));
        assert!(wall.meets_interior_of(&seg(0.0, 3.0, 0.0, 6.0)));
        // only the ray's start touches the wall's end
        assert!(!wall.meets_interior_of(&seg(0.0, 4.0, 0.0, 6.0)));
    }

    #[test]
    fn test_zero_length_ray() {
        let wall = seg(0.0, 0.0, 0.0, 4.0);
        assert!(!wall.meets_interior_of(&seg(0.0, 2.0, 0.0, 2.0)));
    }

    #[test]
    fn test_symmetric() {
        let a = seg(1.0, 5.0, 5.0, 1.0);
        let b = seg(0.0, 0.0, 6.0, 6.0);
        assert_eq!(a.intersects(&b), b.intersects(&a));
    }
}
