//! Evolutionary placement of signal sources on polygonal floor plans.
//!
//! The crate has two halves that meet in [`problems::Placement`]:
//!
//! - **Floor plan** ([`floorplan`]): walls are registered as polylines, the
//!   convex hull of their vertices becomes the boundary, and a breadth-first
//!   flood fill from an origin discretizes it into a 4-connected lattice of
//!   interior points. A simulation assigns a field value (walls crossed,
//!   or distance) to every interior point for a set of sources.
//! - **Genetic algorithm** ([`ga`]): a [`GeneticProblem`](ga::GeneticProblem)
//!   contract (generate, evaluate, mutate, reproduce), roulette and
//!   tournament selection for both optimization directions, and a
//!   generation-loop runner.
//!
//! Supporting modules: [`geometry`] (points, segments, convex polygons),
//! [`random`] (seeded generators) and [`error`].
//!
//! Randomness is always passed in explicitly, so every operation is
//! reproducible from a seed.
//!
//! # Example
//!
//! ```
//! use u_siting::floorplan::FloorPlan;
//! use u_siting::ga::{EvolutionConfig, EvolutionRunner};
//! use u_siting::geometry::Point;
//! use u_siting::problems::Placement;
//! use u_siting::random::create_rng;
//!
//! let mut plan = FloorPlan::new(2.0)?;
//! plan.add_wall([(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 20.0), (0.0, 0.0)])?;
//! plan.add_wall([(11.0, 0.0), (11.0, 12.0)])?;
//! plan.discretize(&mut create_rng(1))?;
//!
//! // Perimeter points sit on the outer walls without being behind them;
//! // only the inner wall shadows part of the room.
//! let field = plan.simulate(&[Point::new(10.0, 10.0)])?;
//! assert_eq!(field.get(&Point::new(0.0, 0.0)), Some(0.0));
//! assert_eq!(field.max(), Some(1.0));
//!
//! let problem = Placement::new(&plan, 1)?;
//! let config = EvolutionConfig::default()
//!     .with_population_size(10)
//!     .with_max_generations(5)
//!     .with_seed(42);
//! let result = EvolutionRunner::run(&problem, &config)?;
//! assert!(plan.is_interior(&result.best.genes()[0]));
//! # Ok::<(), u_siting::SitingError>(())
//! ```

pub mod error;
pub mod floorplan;
pub mod ga;
pub mod geometry;
pub mod problems;
pub mod random;

pub use error::{Result, SitingError};
