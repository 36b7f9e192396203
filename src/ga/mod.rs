//! Genetic Algorithm framework.
//!
//! A generic GA framework built on trait-based abstractions. Users define
//! their encoding by implementing [`GeneticProblem`], which specifies how
//! to generate, evaluate, mutate and reproduce chromosomes.
//!
//! # Core Types
//!
//! - [`Chromosome`]: A candidate solution wrapping its genes
//! - [`GeneticProblem`]: Encoding contract: generate, evaluate, mutate, reproduce
//! - [`Objective`]: Minimize or maximize
//!
//! # Selection
//!
//! - [`select_roulette`]: Fitness-proportionate sampling, survivors or removals
//!   depending on the objective
//! - [`select_tournament`]: Best of three uniform draws, repeated
//!
//! # Running
//!
//! - [`EvolutionConfig`]: Loop parameters (population, selection, rates)
//! - [`EvolutionRunner`]: Executes the generation loop
//! - [`EvolutionResult`]: Best chromosome, history and final population
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
mod selection;
mod types;

pub use config::EvolutionConfig;
pub use runner::{EvolutionResult, EvolutionRunner};
pub use selection::{select_roulette, select_tournament, SelectionMethod, TOURNAMENT_SIZE};
pub use types::{Chromosome, Encoding, GeneticProblem, Objective};

pub(crate) use types::mutation_fires;
