//! Bit-string encoding of `min x²`.

use crate::error::Result;
use crate::ga::{mutation_fires, Chromosome, Encoding, GeneticProblem};
use rand::Rng;

/// Width of the two's-complement string.
pub const BIT_WIDTH: usize = 7;

/// Largest value drawn by `generate`.
pub const MAX_GENERATED: i64 = 63;

/// Minimizes `x²` over 7-bit two's-complement integers (-64..=63).
///
/// Genes are stored most significant bit first. `generate` only draws
/// non-negative values; negative ones appear through mutation and
/// crossover.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticBits;

impl QuadraticBits {
    /// Encodes `value` as a [`BIT_WIDTH`]-bit two's-complement string.
    pub fn encode(value: i64) -> Vec<bool> {
        (0..BIT_WIDTH).rev().map(|i| (value >> i) & 1 == 1).collect()
    }

    /// Decodes a two's-complement string, MSB first.
    pub fn decode(bits: &[bool]) -> i64 {
        let unsigned = bits.iter().fold(0i64, |acc, &b| (acc << 1) | b as i64);
        match bits.first() {
            Some(true) => unsigned - (1i64 << bits.len()),
            _ => unsigned,
        }
    }
}

impl GeneticProblem for QuadraticBits {
    type Genes = Vec<bool>;
    const ENCODING: Encoding = Encoding::BitString;

    fn generate<R: Rng>(&self, rng: &mut R) -> Result<Chromosome<Vec<bool>>> {
        Ok(Chromosome::new(Self::encode(
            rng.random_range(0..=MAX_GENERATED),
        )))
    }

    fn evaluate(&self, chromosome: &Chromosome<Vec<bool>>) -> f64 {
        let x = Self::decode(chromosome.genes()) as f64;
        x * x
    }

    /// Flips one random bit.
    fn mutate<R: Rng>(
        &self,
        chromosome: &Chromosome<Vec<bool>>,
        chance: f64,
        rng: &mut R,
    ) -> Chromosome<Vec<bool>> {
        if chromosome.genes().is_empty() || !mutation_fires(chance, rng) {
            return chromosome.clone();
        }
        let mut bits = chromosome.genes().clone();
        let i = rng.random_range(0..bits.len());
        bits[i] = !bits[i];
        Chromosome::new(bits)
    }

    /// One-point crossover; the cut never falls before the first or after
    /// the last bit.
    fn reproduce<R: Rng>(
        &self,
        first: &Chromosome<Vec<bool>>,
        second: &Chromosome<Vec<bool>>,
        rng: &mut R,
    ) -> Result<[Chromosome<Vec<bool>>; 2]> {
        let (a, b) = (first.genes(), second.genes());
        let n = a.len().min(b.len());
        if n < 3 {
            return Ok([first.clone(), second.clone()]);
        }
        let cut = rng.random_range(1..n - 1);

        let child = |head: &[bool], tail: &[bool]| {
            let mut bits = head[..cut].to_vec();
            bits.extend_from_slice(&tail[cut..]);
            Chromosome::new(bits)
        };
        Ok([child(a, b), child(b, a)])
    }
}
