//! Floor-plan lattice construction and queries.

use super::field::{FieldMap, FieldModel};
use super::wall::Wall;
use crate::error::{Result, SitingError};
use crate::geometry::{Point, Polygon, GEOMETRY_EPSILON};
use rand::Rng;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

/// Relative tolerance used when snapping a coordinate onto the lattice.
///
/// A quotient within this distance of an integer is treated as that
/// integer, so `origin + (i + 1) * spacing - spacing` still resolves to
/// cell `i`.
pub const LATTICE_EPSILON: f64 = 1e-9;

/// A floor plan: walls, a convex boundary and its interior lattice.
///
/// # Examples
///
/// ```
/// use u_siting::floorplan::FloorPlan;
/// use u_siting::random::create_rng;
///
/// let mut plan = FloorPlan::new(1.0).unwrap();
/// plan.add_wall([(0.0, 0.0), (4.0, 0.0)]).unwrap();
/// plan.add_wall([(4.0, 0.0), (4.0, 4.0)]).unwrap();
/// plan.add_wall([(4.0, 4.0), (0.0, 4.0)]).unwrap();
/// plan.add_wall([(0.0, 4.0), (0.0, 0.0)]).unwrap();
///
/// let count = plan.discretize(&mut create_rng(42)).unwrap();
/// assert_eq!(count, 25);
/// ```
#[derive(Debug, Clone)]
pub struct FloorPlan {
    spacing: f64,
    walls: Vec<Wall>,
    field_model: FieldModel,
    boundary: Option<Polygon>,
    origin: Option<Point>,
    /// Interior points in discovery order.
    interior: Vec<Point>,
    members: HashSet<Point>,
}

impl FloorPlan {
    /// Creates an empty floor plan with the given lattice pitch.
    ///
    /// # Errors
    ///
    /// [`SitingError::InvalidGeometry`] if `spacing` is not a positive,
    /// finite number.
    pub fn new(spacing: f64) -> Result<Self> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(SitingError::InvalidGeometry(format!(
                "spacing must be positive and finite, got {spacing}"
            )));
        }
        Ok(Self {
            spacing,
            walls: Vec::new(),
            field_model: FieldModel::default(),
            boundary: None,
            origin: None,
            interior: Vec::new(),
            members: HashSet::new(),
        })
    }

    /// Sets the model used by [`simulate`](Self::simulate).
    pub fn with_field_model(mut self, model: FieldModel) -> Self {
        self.field_model = model;
        self
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn field_model(&self) -> FieldModel {
        self.field_model
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// The boundary polygon, once built.
    pub fn boundary(&self) -> Option<&Polygon> {
        self.boundary.as_ref()
    }

    /// The first discretized cell, once chosen.
    pub fn origin(&self) -> Option<&Point> {
        self.origin.as_ref()
    }

    /// Interior lattice points in flood-fill discovery order.
    ///
    /// Empty until [`discretize`](Self::discretize) has run.
    pub fn interior(&self) -> &[Point] {
        &self.interior
    }

    pub fn interior_len(&self) -> usize {
        self.interior.len()
    }

    /// Returns `true` if `point` is an interior lattice point.
    pub fn is_interior(&self, point: &Point) -> bool {
        self.members.contains(point)
    }

    /// Returns `true` once [`discretize`](Self::discretize) has run since
    /// the last wall was added.
    pub fn is_discretized(&self) -> bool {
        !self.interior.is_empty()
    }

    /// Registers a wall polyline.
    ///
    /// Any previously computed boundary, origin and interior are discarded.
    ///
    /// # Errors
    ///
    /// [`SitingError::InvalidGeometry`] for fewer than two points or a
    /// non-finite coordinate.
    pub fn add_wall<I, P>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        let wall = Wall::new(points.into_iter().map(Into::into).collect())?;
        self.walls.push(wall);
        if self.boundary.is_some() || self.origin.is_some() {
            debug!("wall added after discretization, discarding lattice");
            self.invalidate();
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.boundary = None;
        self.origin = None;
        self.interior.clear();
        self.members.clear();
    }

    /// Builds the boundary as the convex hull of every wall vertex.
    ///
    /// # Errors
    ///
    /// - [`SitingError::DomainNotReady`] if no wall has been added
    /// - [`SitingError::InvalidGeometry`] if the walls enclose no area
    pub fn build_boundary(&mut self) -> Result<&Polygon> {
        if self.walls.is_empty() {
            return Err(SitingError::DomainNotReady("no walls have been added"));
        }
        let hull = Polygon::convex_hull(self.walls.iter().flat_map(|w| w.points()));
        if hull.is_degenerate() || hull.area() <= GEOMETRY_EPSILON {
            return Err(SitingError::InvalidGeometry(
                "wall endpoints do not enclose an area".into(),
            ));
        }
        Ok(self.boundary.insert(hull))
    }

    /// Picks the lattice origin inside the boundary.
    ///
    /// Uses the center of the boundary's bounding box if the boundary
    /// contains it, otherwise samples uniform points in the bounding box
    /// until one falls inside. The boundary is convex, so it covers at
    /// least half of its bounding box and sampling ends quickly.
    pub fn choose_origin<R: Rng>(&mut self, rng: &mut R) -> Result<Point> {
        let boundary = match self.boundary.take() {
            Some(b) => b,
            None => self.build_boundary()?.clone(),
        };
        let (min_x, min_y, max_x, max_y) = boundary.bounds();
        let center = Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

        let origin = if boundary.contains(&center) {
            center
        } else {
            warn!(%center, "bounding-box center outside boundary, sampling origin");
            loop {
                let candidate = Point::new(
                    rng.random_range(min_x..=max_x),
                    rng.random_range(min_y..=max_y),
                );
                if boundary.contains(&candidate) {
                    break candidate;
                }
            }
        };

        self.boundary = Some(boundary);
        self.origin = Some(origin.clone());
        Ok(origin)
    }

    /// Flood-fills the boundary with lattice points reachable from the
    /// origin and returns how many were found.
    ///
    /// Rebuilds the boundary and re-chooses the origin first. The fill is a
    /// breadth-first search over the implicit 4-connected lattice: a cell
    /// outside the boundary or already visited is skipped, any other cell
    /// joins the interior and queues its four neighbors. The origin itself
    /// is always interior.
    ///
    /// Cells are tracked by integer offset from the origin, and every
    /// interior point is built as `origin + offset * spacing` with its
    /// neighbors precomputed the same way, so a cell has exactly one
    /// floating-point representation.
    ///
    /// # Complexity
    /// O(interior points) time and space.
    pub fn discretize<R: Rng>(&mut self, rng: &mut R) -> Result<usize> {
        self.invalidate();
        self.build_boundary()?;
        let origin = self.choose_origin(rng)?;
        let boundary = self
            .boundary
            .as_ref()
            .ok_or(SitingError::DomainNotReady("boundary missing after build"))?;

        let mut visited: HashSet<(i64, i64)> = HashSet::new();
        let mut order: Vec<(i64, i64)> = vec![(0, 0)];
        visited.insert((0, 0));

        let mut queue: VecDeque<(i64, i64)> = neighbor_cells((0, 0)).into_iter().collect();
        while let Some(cell) = queue.pop_front() {
            let p = cell_point(&origin, self.spacing, cell);
            if !boundary.contains(&p) {
                continue;
            }
            if !visited.insert(cell) {
                continue;
            }
            order.push(cell);
            queue.extend(neighbor_cells(cell));
        }

        self.interior = order
            .into_iter()
            .map(|cell| {
                let p = cell_point(&origin, self.spacing, cell);
                let n = neighbor_cells(cell).map(|c| cell_point(&origin, self.spacing, c));
                Point::with_neighbors(p.x(), p.y(), n)
            })
            .collect();
        self.members = self.interior.iter().cloned().collect();
        if let Some(stored) = self.interior.first() {
            self.origin = Some(stored.clone());
        }

        debug!(
            interior = self.interior.len(),
            %origin,
            spacing = self.spacing,
            "floor plan discretized"
        );
        Ok(self.interior.len())
    }

    /// Resolves an arbitrary coordinate to its interior lattice point.
    ///
    /// The cell is found by truncating `(point - origin) / spacing` on each
    /// axis and re-adding that many spacings to the origin. Truncation
    /// always moves *toward the origin*: this is not a nearest-cell lookup,
    /// and a point just past the midpoint between two cells still resolves
    /// to the one closer to the origin.
    ///
    /// Returns `None` when the cell is not an interior point, when the plan
    /// is not discretized, or when `point` is not finite. `None` is an
    /// ordinary outcome and drives the retry loops of the placement
    /// operators.
    pub fn locate(&self, point: &Point) -> Option<Point> {
        let origin = self.origin.as_ref()?;
        if !point.is_finite() {
            return None;
        }
        let dx = lattice_offset((point.x() - origin.x()) / self.spacing)?;
        let dy = lattice_offset((point.y() - origin.y()) / self.spacing)?;
        let estimate = cell_point(origin, self.spacing, (dx, dy));
        self.members.get(&estimate).cloned()
    }

    /// Computes the field value of every interior point for `sources`.
    ///
    /// The plan itself is not modified; concurrent simulations against one
    /// plan are fine.
    ///
    /// # Errors
    ///
    /// - [`SitingError::DomainNotReady`] if the plan is not discretized
    /// - [`SitingError::NoSources`] if `sources` is empty
    pub fn simulate(&self, sources: &[Point]) -> Result<FieldMap> {
        if !self.is_discretized() {
            return Err(SitingError::DomainNotReady(
                "floor plan has not been discretized",
            ));
        }
        let source = sources.first().ok_or(SitingError::NoSources)?;

        let values: HashMap<Point, f64> = self
            .interior
            .iter()
            .map(|p| (p.clone(), self.field_model.value(&self.walls, source, p)))
            .collect();
        Ok(FieldMap::new(sources.to_vec(), values))
    }
}

fn cell_point(origin: &Point, spacing: f64, (i, j): (i64, i64)) -> Point {
    Point::new(
        origin.x() + i as f64 * spacing,
        origin.y() + j as f64 * spacing,
    )
}

/// Up, down, right, left; same order as [`Point::compute_neighbors`].
fn neighbor_cells((i, j): (i64, i64)) -> [(i64, i64); 4] {
    [(i, j + 1), (i, j - 1), (i + 1, j), (i - 1, j)]
}

fn lattice_offset(q: f64) -> Option<i64> {
    let nearest = q.round();
    let snapped = if (q - nearest).abs() <= LATTICE_EPSILON * nearest.abs().max(1.0) {
        nearest
    } else {
        q.trunc()
    };
    if snapped.abs() > i64::MAX as f64 {
        return None;
    }
    Some(snapped as i64)
}
