//! Generation loop execution.
//!
//! [`EvolutionRunner`] drives a [`GeneticProblem`] through
//! generate → evaluate → select → reproduce → mutate → repeat.

use super::config::EvolutionConfig;
use super::types::{Chromosome, GeneticProblem, Objective};
use crate::error::Result;
use crate::random::create_rng;
use rand::Rng;
use tracing::{debug, info};

/// Result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<G> {
    /// The best chromosome seen during the entire run.
    pub best: Chromosome<G>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run stopped on the stagnation limit.
    pub stagnated: bool,

    /// Best fitness after the initial population and after each generation.
    pub fitness_history: Vec<f64>,

    /// The last generation.
    pub population: Vec<Chromosome<G>>,
}

/// Executes the generation loop.
///
/// Each generation:
///
/// 1. Survivors are selected from the evaluated population with the
///    configured [`SelectionMethod`](super::SelectionMethod) and
///    [`Objective`], asking for [`EvolutionConfig::survivor_count`].
/// 2. Survivors carry over unchanged (their fitness is reused).
/// 3. Random survivor pairs reproduce (with `crossover_rate`) until the
///    population is full; every offspring is mutated with
///    `mutation_chance`.
/// 4. Offspring are evaluated and the best-so-far is updated.
///
/// # Usage
///
/// ```
/// use u_siting::ga::{EvolutionConfig, EvolutionRunner};
/// use u_siting::problems::QuadraticDecimal;
///
/// let config = EvolutionConfig::default()
///     .with_max_generations(20)
///     .with_seed(42);
/// let result = EvolutionRunner::run(&QuadraticDecimal, &config).unwrap();
/// assert!(result.best_fitness >= 0.0);
/// ```
pub struct EvolutionRunner;

impl EvolutionRunner {
    /// Runs the evolution.
    ///
    /// # Errors
    ///
    /// - [`SitingError::InvalidConfig`](crate::SitingError::InvalidConfig)
    ///   from [`EvolutionConfig::validate`]
    /// - any error from [`GeneticProblem::generate`] or
    ///   [`GeneticProblem::reproduce`], e.g. `NotImplemented` when
    ///   `crossover_rate > 0` for an encoding without reproduction
    pub fn run<P: GeneticProblem>(
        problem: &P,
        config: &EvolutionConfig,
    ) -> Result<EvolutionResult<P::Genes>> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let objective = config.objective;

        // 1. Initialize and evaluate
        let mut population: Vec<Chromosome<P::Genes>> = (0..config.population_size)
            .map(|_| problem.generate(&mut rng))
            .collect::<Result<_>>()?;
        let mut fitness = evaluate_population(problem, &population, config.parallel);

        let best_idx = find_best(&fitness, objective);
        let mut best = population[best_idx].clone();
        let mut best_fitness = fitness[best_idx];
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best_fitness);

        let mut stagnation_counter = 0usize;
        let mut generations = 0usize;
        let mut stagnated = false;

        // 2. Generation loop
        for gen in 0..config.max_generations {
            let indices: Vec<usize> = (0..population.len()).collect();
            let mut survivors = config.selection.select(
                &indices,
                |&i| fitness[i],
                config.survivor_count(),
                objective,
                &mut rng,
            );
            if survivors.is_empty() {
                survivors.push(find_best(&fitness, objective));
            }
            survivors.truncate(config.population_size);

            let mut next: Vec<Chromosome<P::Genes>> =
                survivors.iter().map(|&i| population[i].clone()).collect();
            let mut next_fitness: Vec<f64> = survivors.iter().map(|&i| fitness[i]).collect();
            let carried = next.len();

            while next.len() < config.population_size {
                let first = &population[survivors[rng.random_range(0..survivors.len())]];
                let second = &population[survivors[rng.random_range(0..survivors.len())]];

                let children: Vec<Chromosome<P::Genes>> =
                    if rng.random_bool(config.crossover_rate) {
                        problem.reproduce(first, second, &mut rng)?.into()
                    } else {
                        vec![first.clone()]
                    };

                for child in children {
                    if next.len() >= config.population_size {
                        break;
                    }
                    next.push(problem.mutate(&child, config.mutation_chance, &mut rng));
                }
            }

            next_fitness.extend(evaluate_population(
                problem,
                &next[carried..],
                config.parallel,
            ));
            population = next;
            fitness = next_fitness;
            generations = gen + 1;

            let gen_best = find_best(&fitness, objective);
            if objective.is_better(fitness[gen_best], best_fitness) {
                best = population[gen_best].clone();
                best_fitness = fitness[gen_best];
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }
            fitness_history.push(best_fitness);

            debug!(
                generation = generations,
                survivors = carried,
                generation_best = fitness[gen_best],
                best = best_fitness,
                "generation complete"
            );

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        info!(
            encoding = %P::ENCODING,
            generations,
            best = best_fitness,
            stagnated,
            "evolution finished"
        );

        Ok(EvolutionResult {
            best,
            best_fitness,
            generations,
            stagnated,
            fitness_history,
            population,
        })
    }
}

/// Evaluate every chromosome, in parallel when enabled.
#[cfg(feature = "parallel")]
fn evaluate_population<P: GeneticProblem>(
    problem: &P,
    population: &[Chromosome<P::Genes>],
    parallel: bool,
) -> Vec<f64> {
    use rayon::prelude::*;

    if parallel {
        population.par_iter().map(|c| problem.evaluate(c)).collect()
    } else {
        population.iter().map(|c| problem.evaluate(c)).collect()
    }
}

/// Evaluate every chromosome.
#[cfg(not(feature = "parallel"))]
fn evaluate_population<P: GeneticProblem>(
    problem: &P,
    population: &[Chromosome<P::Genes>],
    _parallel: bool,
) -> Vec<f64> {
    population.iter().map(|c| problem.evaluate(c)).collect()
}

/// Index of the best fitness under `objective`.
fn find_best(fitness: &[f64], objective: Objective) -> usize {
    fitness
        .iter()
        .enumerate()
        .min_by(|a, b| objective.compare(*a.1, *b.1))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

// ============================================================================
// Tests
// ============================================================================
