//! Real-valued encodings: `min x²` and the parabolic cylinder.

use crate::error::Result;
use crate::ga::{mutation_fires, Chromosome, Encoding, GeneticProblem};
use rand::Rng;

/// Magnitude bound of generated genes.
pub const GENE_BOUND: f64 = 63.0;

/// Largest relative change applied by one mutation.
const MUTATION_SCALE: f64 = 0.1;

/// Crossover margin is the parents' distance divided by this.
const MARGIN_DIVISOR: f64 = 3.0;

fn random_sign<R: Rng>(rng: &mut R) -> f64 {
    if rng.random_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

fn random_gene<R: Rng>(rng: &mut R) -> f64 {
    random_sign(rng) * GENE_BOUND * rng.random::<f64>()
}

/// Moves `x` by up to 10% of itself, up or down.
fn perturb<R: Rng>(x: f64, rng: &mut R) -> f64 {
    let variation = MUTATION_SCALE * rng.random::<f64>() * random_sign(rng);
    x + x * variation
}

/// Minimizes `x²` with a single real gene.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticDecimal;

impl GeneticProblem for QuadraticDecimal {
    type Genes = f64;
    const ENCODING: Encoding = Encoding::Decimal;

    fn generate<R: Rng>(&self, rng: &mut R) -> Result<Chromosome<f64>> {
        Ok(Chromosome::new(random_gene(rng)))
    }

    fn evaluate(&self, chromosome: &Chromosome<f64>) -> f64 {
        chromosome.genes().powi(2)
    }

    fn mutate<R: Rng>(
        &self,
        chromosome: &Chromosome<f64>,
        chance: f64,
        rng: &mut R,
    ) -> Chromosome<f64> {
        if !mutation_fires(chance, rng) {
            return chromosome.clone();
        }
        Chromosome::new(perturb(*chromosome.genes(), rng))
    }

    /// Shifts each parent up or down by a third of their distance.
    fn reproduce<R: Rng>(
        &self,
        first: &Chromosome<f64>,
        second: &Chromosome<f64>,
        rng: &mut R,
    ) -> Result<[Chromosome<f64>; 2]> {
        let (a, b) = (*first.genes(), *second.genes());
        let margin = (a - b).abs() / MARGIN_DIVISOR;
        Ok([
            Chromosome::new(a + margin * random_sign(rng)),
            Chromosome::new(b + margin * random_sign(rng)),
        ])
    }
}

/// Minimizes `z = x² − 2xy + 6x + y² − 6y` over two real genes.
///
/// The surface is a parabolic cylinder: every point on the line
/// `x − y = −3` reaches the minimum of −9.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParabolicCylinder;

impl ParabolicCylinder {
    pub fn surface(x: f64, y: f64) -> f64 {
        x * x - 2.0 * x * y + 6.0 * x + y * y - 6.0 * y
    }
}

impl GeneticProblem for ParabolicCylinder {
    type Genes = [f64; 2];
    const ENCODING: Encoding = Encoding::TwoVariable;

    fn generate<R: Rng>(&self, rng: &mut R) -> Result<Chromosome<[f64; 2]>> {
        Ok(Chromosome::new([random_gene(rng), random_gene(rng)]))
    }

    fn evaluate(&self, chromosome: &Chromosome<[f64; 2]>) -> f64 {
        let [x, y] = *chromosome.genes();
        Self::surface(x, y)
    }

    fn mutate<R: Rng>(
        &self,
        chromosome: &Chromosome<[f64; 2]>,
        chance: f64,
        rng: &mut R,
    ) -> Chromosome<[f64; 2]> {
        if !mutation_fires(chance, rng) {
            return chromosome.clone();
        }
        let [x, y] = *chromosome.genes();
        Chromosome::new([perturb(x, rng), perturb(y, rng)])
    }

    fn reproduce<R: Rng>(
        &self,
        first: &Chromosome<[f64; 2]>,
        second: &Chromosome<[f64; 2]>,
        rng: &mut R,
    ) -> Result<[Chromosome<[f64; 2]>; 2]> {
        let (a, b) = (first.genes(), second.genes());
        let margins = [
            (a[0] - b[0]).abs() / MARGIN_DIVISOR,
            (a[1] - b[1]).abs() / MARGIN_DIVISOR,
        ];
        let mut child = |p: &[f64; 2]| {
            Chromosome::new([
                p[0] + margins[0] * random_sign(rng),
                p[1] + margins[1] * random_sign(rng),
            ])
        };
        Ok([child(a), child(b)])
    }
}
