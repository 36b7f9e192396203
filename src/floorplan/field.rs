//! Field models and simulation results.

use crate::geometry::{Point, Segment};
use std::collections::HashMap;

use super::Wall;

/// How a simulation assigns a value to each interior point.
///
/// Every model measures from the *first* source only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldModel {
    /// Number of walls crossed by the segment from the source to the point.
    ///
    /// A polyline wall counts once no matter how many of its segments the
    /// ray touches.
    #[default]
    WallCrossings,

    /// Euclidean distance from the source to the point.
    Distance,
}

impl FieldModel {
    /// Value of the field at `point` for `source`.
    pub fn value(self, walls: &[Wall], source: &Point, point: &Point) -> f64 {
        match self {
            FieldModel::WallCrossings => {
                let ray = Segment::new(source, point);
                walls.iter().filter(|w| w.blocks(&ray)).count() as f64
            }
            FieldModel::Distance => source.distance(point),
        }
    }
}

/// Result of [`FloorPlan::simulate`](super::FloorPlan::simulate): one value
/// per interior point, plus the sources that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap {
    sources: Vec<Point>,
    values: HashMap<Point, f64>,
}

impl FieldMap {
    pub(crate) fn new(sources: Vec<Point>, values: HashMap<Point, f64>) -> Self {
        Self { sources, values }
    }

    pub fn sources(&self) -> &[Point] {
        &self.sources
    }

    /// Field value at `point`, if it is an interior point.
    pub fn get(&self, point: &Point) -> Option<f64> {
        self.values.get(point).copied()
    }

    /// Worst (largest) value over the interior, or `None` if empty.
    pub fn max(&self) -> Option<f64> {
        self.values.values().copied().reduce(f64::max)
    }

    /// Best (smallest) value over the interior, or `None` if empty.
    pub fn min(&self) -> Option<f64> {
        self.values.values().copied().reduce(f64::min)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Point, f64)> {
        self.values.iter().map(|(p, v)| (p, *v))
    }
}
