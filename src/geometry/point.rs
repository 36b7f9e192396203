//! Hashable planar point with a cached lattice neighborhood.

use crate::error::{Result, SitingError};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// An immutable planar coordinate.
///
/// Equality and hashing are structural: two points built from the same
/// coordinates compare equal and hash identically, so points can be used
/// directly as set members, map keys and chromosome genes. `-0.0` and
/// `0.0` are treated as the same coordinate.
///
/// Each point can cache its four axis-aligned neighbors (up, down, right,
/// left) at a given spacing. The cache is filled once by
/// [`compute_neighbors`](Point::compute_neighbors); reading it before that
/// through [`neighbors`](Point::neighbors) is an error, not an empty list.
///
/// # Examples
///
/// ```
/// use u_siting::geometry::Point;
///
/// let p = Point::new(1.0, 2.0);
/// assert!(p.neighbors().is_err());
///
/// let n = p.compute_neighbors(0.5);
/// assert_eq!(n[0], Point::new(1.0, 2.5));
/// assert_eq!(p.neighbors().unwrap().len(), 4);
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    x: f64,
    y: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    neighbors: OnceLock<Box<[Point; 4]>>,
}

impl Point {
    /// Creates a point with an empty neighbor cache.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            neighbors: OnceLock::new(),
        }
    }

    /// Creates a point whose neighbor cache is already filled.
    ///
    /// Used by the floor-plan lattice, which derives neighbors from integer
    /// cell indices instead of repeated float offsets.
    pub(crate) fn with_neighbors(x: f64, y: f64, neighbors: [Point; 4]) -> Self {
        let cache = OnceLock::new();
        let _ = cache.set(Box::new(neighbors));
        Self {
            x,
            y,
            neighbors: cache,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns `true` if both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Computes and caches the four neighbors at `spacing`.
    ///
    /// Order is up, down, right, left. The cache is write-once: if it is
    /// already filled, the cached neighbors are returned unchanged.
    pub fn compute_neighbors(&self, spacing: f64) -> &[Point; 4] {
        self.neighbors.get_or_init(|| {
            Box::new([
                Point::new(self.x, self.y + spacing),
                Point::new(self.x, self.y - spacing),
                Point::new(self.x + spacing, self.y),
                Point::new(self.x - spacing, self.y),
            ])
        })
    }

    /// Returns the cached neighbors.
    ///
    /// # Errors
    ///
    /// [`SitingError::UninitializedNeighbors`] if
    /// [`compute_neighbors`](Point::compute_neighbors) was never called on
    /// this point (or on the lattice that produced it).
    pub fn neighbors(&self) -> Result<&[Point; 4]> {
        self.neighbors
            .get()
            .map(|n| n.as_ref())
            .ok_or(SitingError::UninitializedNeighbors {
                x: self.x,
                y: self.y,
            })
    }

    /// Returns `true` if the neighbor cache is filled.
    pub fn has_neighbors(&self) -> bool {
        self.neighbors.get().is_some()
    }

    fn key(&self) -> (u64, u64) {
        (normalize(self.x).to_bits(), normalize(self.y).to_bits())
    }
}

fn normalize(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Point").field(&self.x).field(&self.y).finish()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2},{:.2})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of(p: &Point) -> u64 {
        let mut h = DefaultHasher::new();
        p.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_neighbors_uninitialized() {
        let p = Point::new(3.0, 4.0);
        assert!(!p.has_neighbors());
        assert_eq!(
            p.neighbors(),
            Err(SitingError::UninitializedNeighbors { x: 3.0, y: 4.0 })
        );
    }

    #[test]
    fn test_compute_neighbors_order() {
        let p = Point::new(0.0, 0.0);
        let n = p.compute_neighbors(2.0);
        assert_eq!(n[0], Point::new(0.0, 2.0));
        assert_eq!(n[1], Point::new(0.0, -2.0));
        assert_eq!(n[2], Point::new(2.0, 0.0));
        assert_eq!(n[3], Point::new(-2.0, 0.0));
        assert!(p.has_neighbors());
    }

    #[test]
    fn test_neighbor_cache_is_write_once() {
        let p = Point::new(0.0, 0.0);
        p.compute_neighbors(1.0);
        let n = p.compute_neighbors(5.0);
        assert_eq!(n[2], Point::new(1.0, 0.0));
    }

    #[test]
    fn test_equality_ignores_cache() {
        let a = Point::new(1.5, -2.0);
        let b = Point::new(1.5, -2.0);
        a.compute_neighbors(1.0);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(Point::new(-0.0, 0.0), Point::new(0.0, -0.0));
        assert_eq!(
            hash_of(&Point::new(-0.0, 0.0)),
            hash_of(&Point::new(0.0, 0.0))
        );
    }

    #[test]
    fn test_set_membership() {
        let mut set = HashSet::new();
        set.insert(Point::new(1.0, 1.0));
        set.insert(Point::new(1.0, 1.0));
        set.insert(Point::new(1.0, 2.0));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_display_and_distance() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.to_string(), "(3.00,4.00)");
        assert!((p.distance(&Point::new(0.0, 0.0)) - 5.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_structural_eq_and_hash(x in -1e6f64..1e6, y in -1e6f64..1e6) {
            let a = Point::new(x, y);
            let b = Point::new(x, y);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
    }
}
