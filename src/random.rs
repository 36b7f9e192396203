//! Seeded random number generation.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a seed.
///
/// Every operator in this crate takes `&mut R where R: Rng`; tests and the
/// runner obtain their generator here so that a seed reproduces a run.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
