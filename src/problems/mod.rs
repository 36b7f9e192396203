//! Concrete chromosome encodings.
//!
//! Each type implements [`GeneticProblem`](crate::ga::GeneticProblem) and is
//! tagged with its [`Encoding`](crate::ga::Encoding):
//!
//! - [`QuadraticBits`]: `min x²` over a 7-bit two's-complement string
//! - [`QuadraticDecimal`]: `min x²` over one real gene
//! - [`ParabolicCylinder`]: `min x² − 2xy + 6x + y² − 6y` over two real genes
//! - [`Placement`]: signal sources on a [`FloorPlan`](crate::floorplan::FloorPlan)
//!
//! The first three are small benchmarks for the operators; [`Placement`]
//! is the siting problem proper.

mod bits;
mod decimal;
mod placement;

pub use bits::{QuadraticBits, BIT_WIDTH, MAX_GENERATED};
pub use decimal::{ParabolicCylinder, QuadraticDecimal, GENE_BOUND};
pub use placement::{Placement, MUTATION_ATTEMPTS};
