//! Polygonal floor plans discretized into point lattices.
//!
//! A [`FloorPlan`] collects wall polylines, derives its boundary as the
//! convex hull of every wall vertex, and flood-fills that boundary with a
//! square lattice of pitch `spacing`. The resulting interior points are the
//! candidate locations for signal sources; [`FloorPlan::simulate`] assigns a
//! field value to every one of them for a given set of sources.
//!
//! # Lifecycle
//!
//! 1. [`FloorPlan::new`] with a spacing
//! 2. [`FloorPlan::add_wall`] for each wall (setup)
//! 3. [`FloorPlan::discretize`] once all walls are in
//! 4. [`FloorPlan::locate`] / [`FloorPlan::simulate`] during optimization
//!
//! Adding a wall after step 3 discards the boundary, origin and interior;
//! call `discretize` again before using the plan.

mod field;
mod plan;
mod wall;

pub use field::{FieldMap, FieldModel};
pub use plan::{FloorPlan, LATTICE_EPSILON};
pub use wall::Wall;
