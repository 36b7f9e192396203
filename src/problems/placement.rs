//! Source placement on a discretized floor plan.
//!
//! Genes are `k` interior lattice points, one per signal source. Fitness
//! is the worst field value the sources leave anywhere on the plan, so
//! minimizing it spreads coverage to the least-served cell.
//!
//! Both variation operators keep offspring on the lattice by resolving
//! every candidate through [`FloorPlan::locate`]: mutation gives up on a
//! gene after [`MUTATION_ATTEMPTS`] misses, reproduction retries a gene
//! pair until both children resolve.

use crate::error::{Result, SitingError};
use crate::floorplan::FloorPlan;
use crate::ga::{mutation_fires, Chromosome, Encoding, GeneticProblem};
use crate::geometry::Point;
use rand::Rng;
use tracing::{trace, warn};

/// Neighbor draws per gene before a mutation leaves it unchanged.
pub const MUTATION_ATTEMPTS: usize = 8;

/// Places `sources` points on a borrowed, discretized floor plan.
///
/// # Examples
///
/// ```
/// use u_siting::floorplan::FloorPlan;
/// use u_siting::ga::GeneticProblem;
/// use u_siting::problems::Placement;
/// use u_siting::random::create_rng;
///
/// let mut plan = FloorPlan::new(4.0).unwrap();
/// plan.add_wall([(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 20.0), (0.0, 0.0)])
///     .unwrap();
/// let mut rng = create_rng(42);
/// plan.discretize(&mut rng).unwrap();
///
/// let problem = Placement::new(&plan, 2).unwrap();
/// let c = problem.generate(&mut rng).unwrap();
/// assert_eq!(c.genes().len(), 2);
/// assert_eq!(problem.evaluate(&c), 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    plan: &'a FloorPlan,
    sources: usize,
}

impl<'a> Placement<'a> {
    /// Binds the encoding to `plan` with `sources` genes per chromosome.
    ///
    /// # Errors
    ///
    /// - [`SitingError::InvalidConfig`] if `sources` is zero
    /// - [`SitingError::DomainNotReady`] if `plan` has no interior points
    pub fn new(plan: &'a FloorPlan, sources: usize) -> Result<Self> {
        if sources == 0 {
            return Err(SitingError::InvalidConfig(
                "at least one source is required".into(),
            ));
        }
        if !plan.is_discretized() {
            return Err(SitingError::DomainNotReady(
                "floor plan has not been discretized",
            ));
        }
        Ok(Self { plan, sources })
    }

    pub fn plan(&self) -> &'a FloorPlan {
        self.plan
    }

    pub fn sources(&self) -> usize {
        self.sources
    }

    fn mutate_gene<R: Rng>(&self, gene: &Point, rng: &mut R) -> Point {
        let neighbors = gene.compute_neighbors(self.plan.spacing());
        for _ in 0..MUTATION_ATTEMPTS {
            let candidate = &neighbors[rng.random_range(0..neighbors.len())];
            if let Some(p) = self.plan.locate(candidate) {
                return p;
            }
        }
        trace!(%gene, "no interior neighbor found, gene kept");
        gene.clone()
    }

    /// Draws one child pair for a gene position, retrying until both
    /// resolve to interior points.
    ///
    /// There is no attempt cap. Genes produced by this encoding are
    /// interior, and in a convex plan the sign pattern pointing each parent
    /// toward the other lands inside, so the loop ends in practice. Parents
    /// that are not interior points can keep it spinning.
    fn cross_gene<R: Rng>(&self, a: &Point, b: &Point, rng: &mut R) -> (Point, Point) {
        let margin_x = (a.x() - b.x()).abs() / 2.0;
        let margin_y = (a.y() - b.y()).abs() / 2.0;
        loop {
            let first = offset(a, margin_x, margin_y, rng);
            let second = offset(b, margin_x, margin_y, rng);
            if let (Some(p), Some(q)) = (self.plan.locate(&first), self.plan.locate(&second)) {
                return (p, q);
            }
        }
    }
}

fn offset<R: Rng>(p: &Point, margin_x: f64, margin_y: f64, rng: &mut R) -> Point {
    let sx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let sy = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    Point::new(p.x() + sx * margin_x, p.y() + sy * margin_y)
}

impl GeneticProblem for Placement<'_> {
    type Genes = Vec<Point>;
    const ENCODING: Encoding = Encoding::Spatial;

    /// Samples `sources` interior points uniformly, with replacement.
    fn generate<R: Rng>(&self, rng: &mut R) -> Result<Chromosome<Vec<Point>>> {
        let interior = self.plan.interior();
        if interior.is_empty() {
            return Err(SitingError::DomainNotReady(
                "floor plan has no interior points",
            ));
        }
        let genes = (0..self.sources)
            .map(|_| interior[rng.random_range(0..interior.len())].clone())
            .collect();
        Ok(Chromosome::new(genes))
    }

    /// Worst field value over the plan. Infinite if the plan cannot be
    /// simulated, which ranks the chromosome last when minimizing.
    fn evaluate(&self, chromosome: &Chromosome<Vec<Point>>) -> f64 {
        match self.plan.simulate(chromosome.genes()) {
            Ok(field) => field.max().unwrap_or(f64::INFINITY),
            Err(e) => {
                warn!(error = %e, "simulation failed");
                f64::INFINITY
            }
        }
    }

    /// Steps every gene to a random lattice neighbor.
    fn mutate<R: Rng>(
        &self,
        chromosome: &Chromosome<Vec<Point>>,
        chance: f64,
        rng: &mut R,
    ) -> Chromosome<Vec<Point>> {
        if !mutation_fires(chance, rng) {
            return chromosome.clone();
        }
        let genes = chromosome
            .genes()
            .iter()
            .map(|g| self.mutate_gene(g, rng))
            .collect();
        Chromosome::new(genes)
    }

    /// Moves each parent's gene by half the pair's per-axis distance, with
    /// a random sign per axis and per child.
    fn reproduce<R: Rng>(
        &self,
        first: &Chromosome<Vec<Point>>,
        second: &Chromosome<Vec<Point>>,
        rng: &mut R,
    ) -> Result<[Chromosome<Vec<Point>>; 2]> {
        let (genes_a, genes_b): (Vec<Point>, Vec<Point>) = first
            .genes()
            .iter()
            .zip(second.genes())
            .map(|(a, b)| self.cross_gene(a, b, rng))
            .unzip();
        Ok([Chromosome::new(genes_a), Chromosome::new(genes_b)])
    }
}
