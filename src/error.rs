//! Error type shared by every module of the crate.

use thiserror::Error;

/// Errors raised by floor-plan construction, chromosome operators and the
/// evolution runner.
///
/// A lattice lookup that misses is *not* an error: [`FloorPlan::locate`]
/// returns `None` for it.
///
/// [`FloorPlan::locate`]: crate::floorplan::FloorPlan::locate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SitingError {
    /// A wall or coordinate cannot describe a usable boundary.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A point's neighbor set was read before it was computed.
    #[error("neighbors of ({x}, {y}) have not been computed; call compute_neighbors first")]
    UninitializedNeighbors { x: f64, y: f64 },

    /// The floor plan has not been discretized, or its interior is empty.
    #[error("floor plan not ready: {0}")]
    DomainNotReady(&'static str),

    /// A chromosome encoding does not provide the requested operator.
    #[error("{encoding} does not implement {operator}")]
    NotImplemented {
        encoding: &'static str,
        operator: &'static str,
    },

    /// A simulation was requested without any source.
    #[error("simulation needs at least one source")]
    NoSources,

    /// A runner configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SitingError>;
