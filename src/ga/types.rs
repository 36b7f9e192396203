//! Core trait definitions for the GA framework.
//!
//! [`GeneticProblem`] is the contract between the generic operators and a
//! concrete encoding; [`Chromosome`] is the payload those operators move
//! around. [`Objective`] says which direction is better.

use crate::error::{Result, SitingError};
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    /// Lower fitness is better.
    #[default]
    Minimize,
    /// Higher fitness is better.
    Maximize,
}

impl Objective {
    /// Returns `true` if fitness `a` is strictly better than `b`.
    pub fn is_better(self, a: f64, b: f64) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Orders fitness values best-first.
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        match self {
            Objective::Minimize => a.total_cmp(&b),
            Objective::Maximize => b.total_cmp(&a),
        }
    }
}

/// Tag naming each concrete encoding, used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Fixed-width two's-complement bit string.
    BitString,
    /// Single real-valued gene.
    Decimal,
    /// Pair of real-valued genes.
    TwoVariable,
    /// Sequence of floor-plan lattice points.
    Spatial,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::BitString => "bit-string",
            Encoding::Decimal => "decimal",
            Encoding::TwoVariable => "two-variable",
            Encoding::Spatial => "spatial",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A candidate solution: an opaque genetic payload.
///
/// Chromosomes are values. Operators never modify one in place; mutation
/// and reproduction always build new chromosomes.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome<G> {
    genes: G,
}

impl<G> Chromosome<G> {
    pub fn new(genes: G) -> Self {
        Self { genes }
    }

    pub fn genes(&self) -> &G {
        &self.genes
    }

    pub fn into_genes(self) -> G {
        self.genes
    }
}

/// Defines a problem encoding for the genetic operators.
///
/// Implementors supply the four operators of the contract:
///
/// 1. **generate**: a random, valid chromosome
/// 2. **evaluate**: its fitness
/// 3. **mutate**: a perturbed copy, applied with a given chance
/// 4. **reproduce**: two children from two parents
///
/// `reproduce` has a default that reports [`SitingError::NotImplemented`],
/// for encodings that only evolve by mutation.
///
/// # Thread Safety
///
/// `GeneticProblem` must be `Send + Sync` because the runner may evaluate
/// a population in parallel (feature `parallel`).
pub trait GeneticProblem: Send + Sync {
    /// Gene payload carried by each chromosome.
    type Genes: Clone + Send + Sync + fmt::Debug;

    /// Which encoding this is.
    const ENCODING: Encoding;

    /// Creates a random chromosome.
    fn generate<R: Rng>(&self, rng: &mut R) -> Result<Chromosome<Self::Genes>>;

    /// Computes the fitness of a chromosome.
    fn evaluate(&self, chromosome: &Chromosome<Self::Genes>) -> f64;

    /// Returns a mutated copy of `chromosome`.
    ///
    /// With probability `1 - chance` the result equals the input.
    fn mutate<R: Rng>(
        &self,
        chromosome: &Chromosome<Self::Genes>,
        chance: f64,
        rng: &mut R,
    ) -> Chromosome<Self::Genes>;

    /// Combines two parents into two children.
    fn reproduce<R: Rng>(
        &self,
        _first: &Chromosome<Self::Genes>,
        _second: &Chromosome<Self::Genes>,
        _rng: &mut R,
    ) -> Result<[Chromosome<Self::Genes>; 2]> {
        Err(SitingError::NotImplemented {
            encoding: Self::ENCODING.name(),
            operator: "reproduce",
        })
    }
}

/// Draws whether a mutation with probability `chance` happens.
///
/// A chance of zero (or NaN) never fires; one always does.
pub(crate) fn mutation_fires<R: Rng>(chance: f64, rng: &mut R) -> bool {
    if !(chance > 0.0) {
        return false;
    }
    rng.random_bool(chance.min(1.0))
}
